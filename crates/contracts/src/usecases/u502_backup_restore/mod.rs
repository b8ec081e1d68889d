pub mod request;

pub use request::CreateBackupRequest;

use crate::usecases::common::UseCaseMetadata;

pub struct BackupRestore;

impl UseCaseMetadata for BackupRestore {
    fn usecase_index() -> &'static str {
        "u502"
    }

    fn usecase_name() -> &'static str {
        "backup_restore"
    }

    fn display_name() -> &'static str {
        "Copias de seguridad"
    }
}
