use async_trait::async_trait;
use contracts::domain::common::{ApplicationDocument, DocumentPatch};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::document_store::{DocumentStore, StoreError};

/// Документ приложения в одном JSON-файле.
///
/// Пока файла нет, `read` возвращает начальный документ (`seed`).
/// Запись идёт через временный файл + rename, так что читатель никогда не видит
/// наполовину записанный документ. Блокировка только упорядочивает записи
/// внутри процесса, версионирования нет.
pub struct JsonFileStore {
    path: PathBuf,
    seed: ApplicationDocument,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, seed: ApplicationDocument) -> Self {
        Self {
            path: path.into(),
            seed,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<ApplicationDocument, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "Document file {} not found, using seed document",
                    self.path.display()
                );
                Ok(self.seed.clone())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, document: &ApplicationDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(
            "Document written to {} ({} bytes)",
            self.path.display(),
            bytes.len()
        );
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn read(&self) -> Result<ApplicationDocument, StoreError> {
        self.load().await
    }

    async fn merge_update(&self, patch: DocumentPatch) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let keys = patch.keys();
        let mut document = self.load().await?;
        document.apply(patch);
        self.write(&document).await?;
        tracing::info!("Document merged: keys={:?}", keys);
        Ok(())
    }

    async fn overwrite(&self, document: ApplicationDocument) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(&document).await?;
        tracing::info!("Document overwritten: {}", self.path.display());
        Ok(())
    }

    fn store_name(&self) -> &str {
        "json-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::demo_document;
    use contracts::domain::a002_group::Group;

    #[tokio::test]
    async fn test_missing_file_reads_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("doc.json"), demo_document());

        let doc = store.read().await.unwrap();
        assert_eq!(doc, demo_document());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_merge_update_persists_on_top_of_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.json");
        let store = JsonFileStore::new(&path, demo_document());

        store
            .merge_update(DocumentPatch {
                groups: Some(vec![Group {
                    id: "g9".to_string(),
                    name: "Grupo Z".to_string(),
                }]),
                ..Default::default()
            })
            .await
            .unwrap();

        let reopened = JsonFileStore::new(&path, ApplicationDocument::default());
        let doc = reopened.read().await.unwrap();
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.groups[0].name, "Grupo Z");
        // untouched keys come from the seed that was in effect
        assert_eq!(doc.pos, demo_document().pos);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("doc.json"), demo_document());

        store.overwrite(ApplicationDocument::default()).await.unwrap();
        assert_eq!(store.read().await.unwrap(), ApplicationDocument::default());
    }

    #[tokio::test]
    async fn test_unreadable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let store = JsonFileStore::new(&path, demo_document());

        let err = store.read().await.unwrap_err();
        assert!(matches!(err, StoreError::Unreadable(_)));
        assert!(!err.is_retryable());
    }
}
