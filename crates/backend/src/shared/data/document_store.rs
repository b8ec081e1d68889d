use async_trait::async_trait;
use contracts::domain::common::{ApplicationDocument, DocumentPatch};
use thiserror::Error;

/// Ошибки хранилища документа
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Document store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document is unreadable: {0}")]
    Unreadable(#[from] serde_json::Error),
}

impl StoreError {
    /// Повтор операции может помочь (сеть, диск), в отличие от испорченного файла
    pub fn is_retryable(&self) -> bool {
        !matches!(self, StoreError::Unreadable(_))
    }
}

/// Single-document store. The only mutations are a shallow top-level merge and
/// a full overwrite; concurrent writers are not coordinated (last write wins).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the whole document
    async fn read(&self) -> Result<ApplicationDocument, StoreError>;

    /// Replace every top-level key present in `patch`
    async fn merge_update(&self, patch: DocumentPatch) -> Result<(), StoreError>;

    /// Replace the whole document
    async fn overwrite(&self, document: ApplicationDocument) -> Result<(), StoreError>;

    /// Store name for logs
    fn store_name(&self) -> &str;
}
