//! Корневой документ приложения и общие помощники

pub mod app_document;

pub use app_document::{ApplicationDocument, DocumentPatch};

/// Новый непрозрачный идентификатор сущности
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
