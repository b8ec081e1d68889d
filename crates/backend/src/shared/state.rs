use std::sync::Arc;

use crate::shared::config::ExportConfig;
use crate::shared::data::DocumentStore;
use crate::shared::llm::AssistantService;
use crate::system::auth::AuthSettings;

/// Состояние приложения, передаётся в каждый обработчик через `State`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub assistant: Arc<AssistantService>,
    pub auth: Arc<AuthSettings>,
    pub export: ExportConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        assistant: AssistantService,
        auth: AuthSettings,
        export: ExportConfig,
    ) -> Self {
        Self {
            store,
            assistant: Arc::new(assistant),
            auth: Arc::new(auth),
            export,
        }
    }
}
