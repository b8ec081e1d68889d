use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::usecases::common::{ErrorCode, UseCaseError};

use crate::shared::data::StoreError;
use crate::shared::llm::LlmError;
use crate::shared::validation::{ServiceError, ValidationError};
use crate::system::auth::AuthError;
use crate::usecases::u501_import_price_list::{ImportError, IngestError};
use crate::usecases::u502_backup_restore::{BackupError, SnapshotError};

/// Ошибка обработчика: HTTP статус + тело `UseCaseError`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: UseCaseError,
}

pub type ApiResult<T> = Result<T, ApiError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InputFormat | ErrorCode::CorruptFile => StatusCode::BAD_REQUEST,
        ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::ExternalError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<UseCaseError> for ApiError {
    fn from(body: UseCaseError) -> Self {
        Self {
            status: status_for(body.code),
            body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{} {}", self.status.as_u16(), self.body);
        } else {
            tracing::warn!("{} {}", self.status.as_u16(), self.body);
        }
        (self.status, Json(self.body)).into_response()
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let body = if e.is_retryable() {
            UseCaseError::external("No se pudo acceder a los datos. Inténtalo de nuevo.")
        } else {
            UseCaseError::internal("Los datos guardados no se pueden leer.")
        };
        body.with_details(e.to_string()).into()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        UseCaseError::validation(e.to_string()).into()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(e) => e.into(),
            ServiceError::NotFound(what, id) => {
                UseCaseError::not_found(format!("{} not found", what))
                    .with_details(id)
                    .into()
            }
            ServiceError::Store(e) => e.into(),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        UseCaseError::input_format(
            "Error al leer el archivo CSV. Asegúrate de que el formato sea correcto.",
        )
        .with_details(e.to_string())
        .into()
    }
}

impl From<ImportError> for ApiError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::Ingest(e) => e.into(),
            ImportError::Store(e) => e.into(),
            ImportError::Export(e) => UseCaseError::internal("Error al exportar los datos.")
                .with_details(e.to_string())
                .into(),
        }
    }
}

impl From<SnapshotError> for ApiError {
    fn from(e: SnapshotError) -> Self {
        match e {
            SnapshotError::EmptyName => {
                UseCaseError::validation(SnapshotError::EmptyName.to_string()).into()
            }
            SnapshotError::Corrupt(details) => UseCaseError::corrupt_file("Archivo inválido o corrupto.")
                .with_details(details)
                .into(),
            SnapshotError::Serialize(e) => UseCaseError::internal("Error al exportar los datos.")
                .with_details(e.to_string())
                .into(),
        }
    }
}

impl From<BackupError> for ApiError {
    fn from(e: BackupError) -> Self {
        match e {
            BackupError::Snapshot(e) => e.into(),
            BackupError::Store(e) => e.into(),
            BackupError::NotFound(id) => UseCaseError::not_found("Copia de seguridad no encontrada")
                .with_details(id)
                .into(),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(e: LlmError) -> Self {
        let message = if e.is_configuration() {
            "El asistente no está configurado correctamente (clave de API)."
        } else {
            "El asistente no está disponible en este momento. Inténtalo de nuevo."
        };
        UseCaseError::external(message)
            .with_details(e.to_string())
            .into()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                UseCaseError::unauthorized(AuthError::InvalidCredentials.to_string()).into()
            }
            AuthError::Token(e) => UseCaseError::internal("No se pudo iniciar la sesión.")
                .with_details(e.to_string())
                .into(),
            AuthError::Store(e) => e.into(),
        }
    }
}
