use serde::{Deserialize, Serialize};

/// Семейство товаров. `id` - числовой код, заданный пользователем.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
}
