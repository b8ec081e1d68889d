use serde::{Deserialize, Serialize};

/// Отчёт супервайзера во входящих администратора
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,

    pub date: String,

    #[serde(rename = "supervisorName")]
    pub supervisor_name: String,

    #[serde(rename = "zoneFilter", default)]
    pub zone_filter: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(rename = "csvContent", default)]
    pub csv_content: String,

    #[serde(default)]
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReportDto {
    #[serde(default)]
    pub zone_filter: String,
    pub kind: String,
    #[serde(default)]
    pub csv_content: String,
}
