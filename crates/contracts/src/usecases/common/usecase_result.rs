use serde::{Deserialize, Serialize};

/// Результат выполнения UseCase
pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Класс ошибки, по которому клиент решает, что показать пользователю
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Файл не удалось прочитать/декодировать
    InputFormat,
    /// Обязательное поле пусто или ключ уже занят
    ValidationError,
    /// Загруженная копия не является документом приложения
    CorruptFile,
    /// Хранилище или ИИ-сервис недоступны, можно повторить
    ExternalError,
    NotFound,
    Unauthorized,
    InternalError,
}

/// Ошибка выполнения UseCase (тело ответа API)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn input_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputFormat, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn corrupt_file(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CorruptFile, message)
    }

    pub fn external(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Ошибки внешних сервисов можно повторить без изменений на стороне пользователя
    pub fn is_retryable(&self) -> bool {
        self.code == ErrorCode::ExternalError
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        UseCaseError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let err = UseCaseError::corrupt_file("Archivo inválido o corrupto").with_details("line 1");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], "CORRUPT_FILE");
        assert_eq!(value["details"], "line 1");
        assert!(!err.is_retryable());
        assert!(UseCaseError::external("store down").is_retryable());
    }
}
