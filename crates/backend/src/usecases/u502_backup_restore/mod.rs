pub mod executor;
pub mod snapshot;

pub use executor::{BackupError, BackupExecutor};
pub use snapshot::SnapshotError;
