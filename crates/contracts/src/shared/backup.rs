use serde::{Deserialize, Serialize};

use crate::domain::common::ApplicationDocument;

/// Named restore point holding a full copy of the document.
/// The payload never carries a snapshot list of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "data")]
    pub payload: ApplicationDocument,

    #[serde(rename = "fecha")]
    pub captured_at: String,
}

/// Entry of the restore point list without the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub id: String,
    pub name: String,
    pub captured_at: String,
}

impl From<&Snapshot> for SnapshotInfo {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            name: snapshot.name.clone(),
            captured_at: snapshot.captured_at.clone(),
        }
    }
}
