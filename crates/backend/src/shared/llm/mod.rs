pub mod assistant;
pub mod openai_provider;
pub mod types;

pub use assistant::AssistantService;
pub use types::*;
