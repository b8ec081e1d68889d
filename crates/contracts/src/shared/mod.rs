pub mod assistant;
pub mod backup;
pub mod price_list;
pub mod settings;
