use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::shared::config::{get_store_path, AssistantConfig, Config, StoreKind};
use crate::shared::data::seed::{demo_document, is_demo};
use crate::shared::data::{DocumentStore, JsonFileStore, MemoryStore};
use crate::shared::llm::openai_provider::OpenAiProvider;
use crate::shared::llm::AssistantService;
use crate::shared::state::AppState;
use crate::system::auth::AuthSettings;

/// Хранилище документа по конфигурации
pub fn build_store(config: &Config) -> Arc<dyn DocumentStore> {
    match config.store.kind {
        StoreKind::File => {
            let path = get_store_path(config);
            tracing::info!("Document store: JSON file {}", path.display());
            Arc::new(JsonFileStore::new(path, demo_document()))
        }
        StoreKind::Memory => {
            tracing::warn!("Document store: in-memory, data is lost on restart");
            Arc::new(MemoryStore::new(demo_document()))
        }
    }
}

/// Ассистент включается только если задан ключ API
pub fn build_assistant(config: &AssistantConfig) -> AssistantService {
    let Some(api_key) = config.api_key() else {
        tracing::warn!(
            "Assistant disabled: environment variable {} is not set",
            config.api_key_env
        );
        return AssistantService::disabled();
    };

    let provider = match &config.endpoint {
        Some(endpoint) => OpenAiProvider::new_with_endpoint(
            endpoint.clone(),
            api_key,
            config.model.clone(),
            config.temperature,
            config.max_tokens,
        ),
        None => OpenAiProvider::new(
            api_key,
            config.model.clone(),
            config.temperature,
            config.max_tokens,
        ),
    };
    tracing::info!("Assistant enabled: model {}", config.model);
    AssistantService::new(Arc::new(provider))
}

/// Первое чтение документа ограничено по времени; при таймауте или ошибке
/// сервис всё равно стартует, проблема только пишется в лог.
pub async fn check_document(store: &dyn DocumentStore, timeout_secs: u64, emergency_admin: bool) {
    match tokio::time::timeout(Duration::from_secs(timeout_secs), store.read()).await {
        Ok(Ok(document)) => {
            tracing::info!(
                "Document loaded from {}: {} users, {} points of sale, {} articles, {} tariffs, {} backups",
                store.store_name(),
                document.users.len(),
                document.pos.len(),
                document.articles.len(),
                document.tariffs.len(),
                document.snapshots.len()
            );
            if is_demo(&document) {
                tracing::warn!("Running with demo data");
            }
            if document.users.is_empty() && !emergency_admin {
                tracing::warn!(
                    "User directory is empty and auth.emergency_admin is off: nobody can log in"
                );
            }
        }
        Ok(Err(e)) => tracing::error!("Document could not be read at startup: {}", e),
        Err(_) => tracing::warn!(
            "Document load took longer than {}s, starting without it",
            timeout_secs
        ),
    }
}

/// Состояние приложения из конфигурации
pub async fn initialize(config: &Config) -> Result<AppState> {
    let store = build_store(config);
    check_document(
        store.as_ref(),
        config.store.load_timeout_secs,
        config.auth.emergency_admin,
    )
    .await;

    let assistant = build_assistant(&config.assistant);
    let auth = AuthSettings::from_config(&config.auth);

    Ok(AppState::new(store, assistant, auth, config.export.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::StoreError;
    use async_trait::async_trait;
    use contracts::domain::common::{ApplicationDocument, DocumentPatch};

    /// Хранилище, которое никогда не отвечает
    struct StalledStore;

    #[async_trait]
    impl DocumentStore for StalledStore {
        async fn read(&self) -> Result<ApplicationDocument, StoreError> {
            std::future::pending().await
        }

        async fn merge_update(&self, _patch: DocumentPatch) -> Result<(), StoreError> {
            std::future::pending().await
        }

        async fn overwrite(&self, _document: ApplicationDocument) -> Result<(), StoreError> {
            std::future::pending().await
        }

        fn store_name(&self) -> &str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_stalled_store_does_not_block_startup() {
        check_document(&StalledStore, 0, false).await;
    }

    #[test]
    fn test_assistant_without_key_is_disabled() {
        let config = AssistantConfig {
            api_key_env: "TARIFAS_TEST_UNSET_KEY".to_string(),
            endpoint: None,
            model: "m".to_string(),
            temperature: 0.7,
            max_tokens: 16,
        };
        assert!(!build_assistant(&config).is_enabled());
    }
}
