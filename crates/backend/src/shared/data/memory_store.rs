use async_trait::async_trait;
use contracts::domain::common::{ApplicationDocument, DocumentPatch};
use tokio::sync::RwLock;

use super::document_store::{DocumentStore, StoreError};

/// In-memory store (demo mode and tests). Data lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<ApplicationDocument>,
}

impl MemoryStore {
    pub fn new(document: ApplicationDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self) -> Result<ApplicationDocument, StoreError> {
        Ok(self.document.read().await.clone())
    }

    async fn merge_update(&self, patch: DocumentPatch) -> Result<(), StoreError> {
        self.document.write().await.apply(patch);
        Ok(())
    }

    async fn overwrite(&self, document: ApplicationDocument) -> Result<(), StoreError> {
        *self.document.write().await = document;
        Ok(())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_merge_then_overwrite() {
        let store = MemoryStore::default();
        store
            .merge_update(DocumentPatch {
                company_name: Some("Carnicerías Demo".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            store.read().await.unwrap().company_name.as_deref(),
            Some("Carnicerías Demo")
        );

        store.overwrite(ApplicationDocument::default()).await.unwrap();
        assert_eq!(store.read().await.unwrap(), ApplicationDocument::default());
    }
}
