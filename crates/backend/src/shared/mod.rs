pub mod api_error;
pub mod config;
pub mod data;
pub mod format;
pub mod llm;
pub mod state;
pub mod validation;
