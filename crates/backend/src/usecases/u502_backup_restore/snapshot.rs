//! Restore points over the whole application document.
//!
//! Pure transforms: the caller reads the document from the store, applies one
//! of these and writes the result back (merge for the snapshot list, full
//! overwrite for restore and import).

use chrono::{NaiveDate, Utc};
use contracts::domain::common::{new_id, ApplicationDocument};
use contracts::shared::backup::Snapshot;
use thiserror::Error;

use crate::shared::format::iso_date;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("El nombre de la copia de seguridad es obligatorio.")]
    EmptyName,

    #[error("Archivo inválido o corrupto")]
    Corrupt(String),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Snapshot of `document` under a trimmed non-empty name.
/// The payload is a copy without the snapshot list; `document` is not touched.
pub fn capture(name: &str, document: &ApplicationDocument) -> Result<Snapshot, SnapshotError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SnapshotError::EmptyName);
    }

    Ok(Snapshot {
        id: new_id(),
        name: name.to_string(),
        payload: document.without_snapshots(),
        captured_at: Utc::now().to_rfc3339(),
    })
}

/// Document to write back in full: the payload with `existing` re-attached as
/// the snapshot list.
pub fn restore(snapshot: &Snapshot, existing: Vec<Snapshot>) -> ApplicationDocument {
    ApplicationDocument {
        snapshots: existing,
        ..snapshot.payload.clone()
    }
}

/// Validate an uploaded backup file. Nested snapshot lists inside payloads are dropped.
pub fn import_external(raw: &[u8]) -> Result<ApplicationDocument, SnapshotError> {
    let mut document: ApplicationDocument =
        serde_json::from_slice(raw).map_err(|e| SnapshotError::Corrupt(e.to_string()))?;

    for snapshot in &mut document.snapshots {
        snapshot.payload.snapshots.clear();
    }
    Ok(document)
}

/// Pretty JSON (2-space indent) of the whole document, snapshot list included.
pub fn export_snapshot(document: &ApplicationDocument) -> Result<Vec<u8>, SnapshotError> {
    Ok(serde_json::to_vec_pretty(document)?)
}

/// List without the snapshot `id`; an unknown id leaves it unchanged.
pub fn discard(id: &str, snapshots: Vec<Snapshot>) -> Vec<Snapshot> {
    snapshots.into_iter().filter(|s| s.id != id).collect()
}

/// `backup_<slug>_<YYYY-MM-DD>.json`
pub fn backup_filename(slug: &str, date: NaiveDate) -> String {
    format!("backup_{}_{}.json", slug, iso_date(date))
}
