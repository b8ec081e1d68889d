use serde::{Deserialize, Serialize};

use super::request::PriceListKind;

/// Результат загрузки прайс-листа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub kind: PriceListKind,
    pub row_count: usize,
    /// Колонки первой записи в порядке файла
    pub columns: Vec<String>,
    /// Предупреждения (не блокируют загрузку)
    pub warnings: Vec<String>,
    pub last_updated: String,
}
