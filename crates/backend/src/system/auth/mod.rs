pub mod extractor;
pub mod jwt;
pub mod middleware;

use thiserror::Error;

use crate::shared::config::AuthConfig;
use crate::shared::data::StoreError;

/// Ошибки входа в систему
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Usuario o contraseña incorrectos.")]
    InvalidCredentials,

    #[error("Failed to issue access token: {0}")]
    Token(#[from] anyhow::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Параметры аутентификации, разделяемые обработчиками и middleware
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_lifetime_hours: i64,
    pub emergency_admin: bool,
}

impl AuthSettings {
    /// Пустой секрет в конфиге -> случайный секрет на время жизни процесса
    pub fn from_config(config: &AuthConfig) -> Self {
        let jwt_secret = if config.jwt_secret.trim().is_empty() {
            tracing::warn!("auth.jwt_secret is empty, using a random per-process secret");
            jwt::generate_jwt_secret()
        } else {
            config.jwt_secret.clone()
        };

        Self {
            jwt_secret,
            token_lifetime_hours: config.token_lifetime_hours,
            emergency_admin: config.emergency_admin,
        }
    }
}
