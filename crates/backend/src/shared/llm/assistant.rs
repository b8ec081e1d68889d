use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::types::{ChatMessage, LlmError, LlmProvider};

/// Контекст (данные на экране пользователя) обрезается до этого числа символов
pub const MAX_CONTEXT_CHARS: usize = 50_000;

const NO_CONTEXT: &str = "El usuario no está visualizando datos específicos ahora mismo.";

/// Ответ, если модель вернула пустой текст
pub const EMPTY_REPLY: &str = "No he podido generar una respuesta. Inténtalo de nuevo.";

/// Сессия чата привязана к блоку контекста, с которым она создана
struct ChatSession {
    context: String,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    fn start(context: &str) -> Self {
        Self {
            context: context.to_string(),
            history: vec![ChatMessage::system(system_prompt(context))],
        }
    }
}

/// Чат-ассистент поверх LLM провайдера.
///
/// Отдельная сессия на каждого пользователя (`sub` из токена). Новый контекст
/// начинает новую сессию этого пользователя; ошибка транспорта или авторизации
/// сбрасывает её, следующий вызов создаст сессию заново.
pub struct AssistantService {
    provider: Option<Arc<dyn LlmProvider>>,
    sessions: Mutex<HashMap<String, ChatSession>>,
}

impl AssistantService {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Ассистент без провайдера: каждый вызов возвращает `NotConfigured`
    pub fn disabled() -> Self {
        Self {
            provider: None,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn has_session(&self, caller: &str) -> bool {
        self.sessions.lock().await.contains_key(caller)
    }

    /// Отправить сообщение от имени `caller` и получить ответ ассистента
    pub async fn send(
        &self,
        caller: &str,
        message: &str,
        context: &str,
    ) -> Result<String, LlmError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| LlmError::NotConfigured("API key not found".to_string()))?;

        let mut sessions = self.sessions.lock().await;

        let restart = sessions
            .get(caller)
            .map_or(true, |session| session.context != context);
        if restart {
            tracing::info!(
                "Starting new assistant session for {} ({}, context {} chars)",
                caller,
                provider.provider_name(),
                context.chars().count()
            );
            sessions.insert(caller.to_string(), ChatSession::start(context));
        }

        let Some(session) = sessions.get_mut(caller) else {
            return Err(LlmError::ApiError("Chat session was not created".to_string()));
        };

        let mut messages = session.history.clone();
        messages.push(ChatMessage::user(message));

        match provider.chat_completion(messages).await {
            Ok(response) => {
                tracing::info!(
                    "Assistant reply: model={}, tokens={:?}, finish={:?}",
                    response.model,
                    response.tokens_used,
                    response.finish_reason
                );
                let reply = if response.content.trim().is_empty() {
                    EMPTY_REPLY.to_string()
                } else {
                    response.content
                };
                session.history.push(ChatMessage::user(message));
                session.history.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                tracing::error!("Assistant request failed, session of {} reset: {}", caller, e);
                sessions.remove(caller);
                Err(e)
            }
        }
    }
}

/// Системная инструкция с данными, которые видит пользователь
pub fn system_prompt(context: &str) -> String {
    let context = if context.trim().is_empty() {
        NO_CONTEXT.to_string()
    } else {
        context.chars().take(MAX_CONTEXT_CHARS).collect()
    };

    format!(
        "Eres un asistente de inteligencia artificial integrado en la aplicación corporativa \"Consulta de Tarifas\".\n\
         \n\
         TU COMPORTAMIENTO DEBE SER:\n\
         1. Idioma: DEBES RESPONDER SIEMPRE EN ESPAÑOL.\n\
         2. Rol: asistente profesional, servicial y experto en los datos de la empresa.\n\
         3. Contexto: a continuación tienes los datos que el usuario está viendo en pantalla. \
         Úsalos para responder preguntas sobre precios, productos o existencias.\n\
         \n\
         CONTEXTO DE DATOS ACTUAL:\n{}",
        context
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::llm::types::{ChatRole, LlmResponse};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    /// Провайдер с заранее заданными ответами, запоминает полученные запросы
    struct ScriptedProvider {
        replies: StdMutex<VecDeque<Result<String, LlmError>>>,
        requests: StdMutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: StdMutex::new(replies.into()),
                requests: StdMutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<Vec<ChatMessage>> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn chat_completion(
            &self,
            messages: Vec<ChatMessage>,
        ) -> Result<LlmResponse, LlmError> {
            self.requests.lock().unwrap().push(messages);
            let next = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("ok".to_string()));
            next.map(|content| LlmResponse {
                content,
                tokens_used: Some(10),
                model: "test-model".to_string(),
                finish_reason: None,
            })
        }

        fn provider_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn test_session_keeps_history_for_same_context() {
        let provider = ScriptedProvider::new(vec![Ok("Hola".into()), Ok("2,50 €".into())]);
        let assistant = AssistantService::new(provider.clone());

        assert_eq!(assistant.send("u1", "hola", "ctx").await.unwrap(), "Hola");
        assert_eq!(assistant.send("u1", "¿precio?", "ctx").await.unwrap(), "2,50 €");

        let requests = provider.requests();
        assert_eq!(requests[0].len(), 2);
        // system + user + assistant + user
        assert_eq!(requests[1].len(), 4);
        assert_eq!(requests[1][0].role, ChatRole::System);
        assert!(requests[1][0].content.contains("ctx"));
    }

    #[tokio::test]
    async fn test_new_context_starts_new_session() {
        let provider = ScriptedProvider::new(vec![]);
        let assistant = AssistantService::new(provider.clone());

        assistant.send("u1", "a", "tarifas tienda 01").await.unwrap();
        assistant.send("u1", "b", "tarifas tienda 02").await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests[1].len(), 2);
        assert!(requests[1][0].content.contains("tienda 02"));
    }

    #[tokio::test]
    async fn test_failure_invalidates_session() {
        let provider = ScriptedProvider::new(vec![
            Ok("primera".into()),
            Err(LlmError::AuthError("401".into())),
            Ok("de nuevo".into()),
        ]);
        let assistant = AssistantService::new(provider.clone());

        assistant.send("u1", "uno", "ctx").await.unwrap();
        let err = assistant.send("u1", "dos", "ctx").await.unwrap_err();
        assert!(err.is_configuration());
        assert!(!assistant.has_session("u1").await);

        assert_eq!(assistant.send("u1", "tres", "ctx").await.unwrap(), "de nuevo");
        // the recreated session does not carry the old history
        assert_eq!(provider.requests()[2].len(), 2);
    }

    #[tokio::test]
    async fn test_empty_reply_and_disabled() {
        let provider = ScriptedProvider::new(vec![Ok("   ".into())]);
        let assistant = AssistantService::new(provider);
        assert_eq!(assistant.send("u1", "x", "").await.unwrap(), EMPTY_REPLY);

        let disabled = AssistantService::disabled();
        assert!(!disabled.is_enabled());
        assert!(matches!(
            disabled.send("u1", "x", "").await,
            Err(LlmError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_callers_do_not_share_history() {
        let provider = ScriptedProvider::new(vec![]);
        let assistant = AssistantService::new(provider.clone());

        assistant
            .send("u1", "mi contraseña es hunter2", "tarifas")
            .await
            .unwrap();
        assistant.send("u2", "¿precio del jamón?", "tarifas").await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests[1].len(), 2);
        assert!(requests[1].iter().all(|m| !m.content.contains("hunter2")));

        // a different context from u2 leaves the u1 session intact
        assistant.send("u2", "otra", "tienda 02").await.unwrap();
        assistant.send("u1", "sigue", "tarifas").await.unwrap();
        assert_eq!(provider.requests()[3].len(), 4);
        assert!(assistant.has_session("u1").await);
        assert!(assistant.has_session("u2").await);
    }

    #[test]
    fn test_system_prompt_truncates_context() {
        const MARKER: &str = "CONTEXTO DE DATOS ACTUAL:\n";
        let long = "x".repeat(MAX_CONTEXT_CHARS + 100);
        let prompt = system_prompt(&long);
        let (_, context) = prompt.split_once(MARKER).unwrap();
        assert_eq!(context.chars().count(), MAX_CONTEXT_CHARS);
        assert!(context.chars().all(|c| c == 'x'));

        assert!(system_prompt("  ").ends_with(NO_CONTEXT));
    }
}
