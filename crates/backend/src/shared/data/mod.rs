pub mod document_store;
pub mod json_file_store;
pub mod memory_store;
pub mod seed;

pub use document_store::{DocumentStore, StoreError};
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
