use thiserror::Error;

use crate::shared::data::StoreError;

/// Ошибки проверки данных перед сохранением (правка не применяется)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("El campo '{0}' es obligatorio.")]
    Required(&'static str),

    #[error("El código \"{0}\" ya está asignado a otra tienda.")]
    DuplicateStoreCode(String),

    #[error("La zona \"{0}\" ya existe.")]
    DuplicateZone(String),

    #[error("Ya existe una familia con el código \"{0}\".")]
    DuplicateFamily(String),
}

/// Ошибка сервисов справочников: валидация, отсутствие записи или сбой хранилища
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Поле считается пустым, если в нём только пробелы
pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}
