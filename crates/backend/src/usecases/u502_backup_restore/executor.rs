use chrono::Local;
use contracts::domain::common::DocumentPatch;
use contracts::shared::backup::SnapshotInfo;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_backup_restore::BackupRestore;
use std::sync::Arc;
use thiserror::Error;

use super::snapshot::{self, SnapshotError};
use crate::shared::data::{DocumentStore, StoreError};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Backup not found: {0}")]
    NotFound(String),
}

/// Executor для UseCase резервных копий: список, создание, восстановление,
/// удаление, выгрузка и загрузка файла
pub struct BackupExecutor {
    store: Arc<dyn DocumentStore>,
}

impl BackupExecutor {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<SnapshotInfo>, BackupError> {
        let document = self.store.read().await?;
        Ok(document.snapshots.iter().map(SnapshotInfo::from).collect())
    }

    /// Новая копия ставится в начало списка
    pub async fn create(&self, name: &str) -> Result<SnapshotInfo, BackupError> {
        let document = self.store.read().await?;
        let snapshot = snapshot::capture(name, &document)?;
        let info = SnapshotInfo::from(&snapshot);

        let mut snapshots = Vec::with_capacity(document.snapshots.len() + 1);
        snapshots.push(snapshot);
        snapshots.extend(document.snapshots);

        self.store
            .merge_update(DocumentPatch {
                snapshots: Some(snapshots),
                ..Default::default()
            })
            .await?;

        tracing::info!(
            "{}: backup '{}' created ({})",
            BackupRestore::full_name(),
            info.name,
            info.id
        );
        Ok(info)
    }

    /// Полная перезапись документа содержимым копии; список копий сохраняется
    pub async fn restore(&self, id: &str) -> Result<(), BackupError> {
        let document = self.store.read().await?;
        let snapshot = document
            .snapshots
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| BackupError::NotFound(id.to_string()))?;

        let restored = snapshot::restore(snapshot, document.snapshots.clone());
        self.store.overwrite(restored).await?;

        tracing::info!("{}: restored backup {}", BackupRestore::full_name(), id);
        Ok(())
    }

    /// Удаление отсутствующей копии ничего не меняет
    pub async fn delete(&self, id: &str) -> Result<(), BackupError> {
        let document = self.store.read().await?;
        let before = document.snapshots.len();
        let snapshots = snapshot::discard(id, document.snapshots);

        if snapshots.len() == before {
            tracing::debug!("Backup {} not in list, nothing to delete", id);
            return Ok(());
        }

        self.store
            .merge_update(DocumentPatch {
                snapshots: Some(snapshots),
                ..Default::default()
            })
            .await?;
        tracing::info!("{}: deleted backup {}", BackupRestore::full_name(), id);
        Ok(())
    }

    /// (имя файла, содержимое)
    pub async fn export(&self, slug: &str) -> Result<(String, Vec<u8>), BackupError> {
        let document = self.store.read().await?;
        let bytes = snapshot::export_snapshot(&document)?;
        let filename = snapshot::backup_filename(slug, Local::now().date_naive());
        Ok((filename, bytes))
    }

    /// Загруженный файл заменяет документ целиком; битый файл ничего не меняет
    pub async fn import(&self, raw: &[u8]) -> Result<(), BackupError> {
        let document = snapshot::import_external(raw).map_err(|e| {
            tracing::warn!("{}: rejected backup file: {:?}", BackupRestore::full_name(), e);
            e
        })?;
        self.store.overwrite(document).await?;
        tracing::info!(
            "{}: document replaced from uploaded file ({} bytes)",
            BackupRestore::full_name(),
            raw.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::demo_document;
    use crate::shared::data::MemoryStore;
    use contracts::domain::a002_group::Group;

    fn executor() -> (Arc<MemoryStore>, BackupExecutor) {
        let store = Arc::new(MemoryStore::new(demo_document()));
        (store.clone(), BackupExecutor::new(store))
    }

    #[tokio::test]
    async fn test_create_prepends() {
        let (_store, executor) = executor();
        executor.create("primera").await.unwrap();
        executor.create("segunda").await.unwrap();

        let names: Vec<String> = executor
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["segunda", "primera"]);
    }

    #[tokio::test]
    async fn test_create_blank_name_changes_nothing() {
        let (store, executor) = executor();
        let err = executor.create(" ").await.unwrap_err();
        assert!(matches!(err, BackupError::Snapshot(SnapshotError::EmptyName)));
        assert!(store.read().await.unwrap().snapshots.is_empty());
    }

    #[tokio::test]
    async fn test_restore_overwrites_and_keeps_list() {
        let (store, executor) = executor();
        let info = executor.create("base").await.unwrap();

        store
            .merge_update(DocumentPatch {
                groups: Some(vec![Group {
                    id: "g9".to_string(),
                    name: "Nuevo".to_string(),
                }]),
                ..Default::default()
            })
            .await
            .unwrap();
        executor.create("despues").await.unwrap();

        executor.restore(&info.id).await.unwrap();

        let doc = store.read().await.unwrap();
        assert_eq!(doc.groups, demo_document().groups);
        assert_eq!(doc.snapshots.len(), 2);
    }

    #[tokio::test]
    async fn test_restore_unknown_id() {
        let (_store, executor) = executor();
        assert!(matches!(
            executor.restore("nope").await,
            Err(BackupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let (_store, executor) = executor();
        let info = executor.create("base").await.unwrap();

        executor.delete(&info.id).await.unwrap();
        executor.delete(&info.id).await.unwrap();
        assert!(executor.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let (store, executor) = executor();
        executor.create("base").await.unwrap();
        let (filename, bytes) = executor.export("tarifas").await.unwrap();
        assert!(filename.starts_with("backup_tarifas_"));
        assert!(filename.ends_with(".json"));

        let exported = store.read().await.unwrap();
        store
            .overwrite(contracts::domain::common::ApplicationDocument::default())
            .await
            .unwrap();

        executor.import(&bytes).await.unwrap();
        assert_eq!(store.read().await.unwrap(), exported);
    }

    #[tokio::test]
    async fn test_corrupt_import_changes_nothing() {
        let (store, executor) = executor();
        let err = executor.import(b"{\"foo\": 1}").await.unwrap_err();
        assert!(matches!(err, BackupError::Snapshot(SnapshotError::Corrupt(_))));
        assert_eq!(store.read().await.unwrap(), demo_document());
    }
}
