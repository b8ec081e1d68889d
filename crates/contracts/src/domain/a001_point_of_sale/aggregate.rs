use serde::{Deserialize, Serialize};

/// Точка продаж (tienda). `código` и `zona` уникальны в справочнике.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfSale {
    pub id: String,

    #[serde(rename = "código")]
    pub code: String,

    #[serde(rename = "zona")]
    pub zone: String,

    #[serde(rename = "grupo")]
    pub group: String,

    #[serde(rename = "dirección", default)]
    pub address: String,

    #[serde(rename = "población", default)]
    pub town: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointOfSaleDto {
    pub id: Option<String>,
    pub code: String,
    pub zone: String,
    pub group: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub town: String,
}
