use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Какой прайс-лист загружается: артикулы или тарифы по магазинам
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceListKind {
    Articles,
    Tariffs,
}

impl PriceListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceListKind::Articles => "articles",
            PriceListKind::Tariffs => "tariffs",
        }
    }
}

impl fmt::Display for PriceListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "articles" => Ok(PriceListKind::Articles),
            "tariffs" => Ok(PriceListKind::Tariffs),
            other => Err(format!("Unknown price list kind: {}", other)),
        }
    }
}
