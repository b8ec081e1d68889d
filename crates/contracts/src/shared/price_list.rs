use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Canonical headers
// ============================================================================

/// Нормализованное имя колонки прайс-листа (артикулы и тарифы)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalHeader {
    Reference,
    Section,
    Description,
    Family,
    LastCost,
    LastSupplier,
    Vat,
    Code,
    Store,
    ArticleCode,
    RetailPrice,
    PromoPrice,
    PromoStart,
    PromoEnd,
}

impl CanonicalHeader {
    pub const ALL: [CanonicalHeader; 14] = [
        CanonicalHeader::Reference,
        CanonicalHeader::Section,
        CanonicalHeader::Description,
        CanonicalHeader::Family,
        CanonicalHeader::LastCost,
        CanonicalHeader::LastSupplier,
        CanonicalHeader::Vat,
        CanonicalHeader::Code,
        CanonicalHeader::Store,
        CanonicalHeader::ArticleCode,
        CanonicalHeader::RetailPrice,
        CanonicalHeader::PromoPrice,
        CanonicalHeader::PromoStart,
        CanonicalHeader::PromoEnd,
    ];

    /// Ключ, под которым колонка хранится в документе
    pub fn label(self) -> &'static str {
        match self {
            CanonicalHeader::Reference => "Referencia",
            CanonicalHeader::Section => "Sección",
            CanonicalHeader::Description => "Descripción",
            CanonicalHeader::Family => "Familia",
            CanonicalHeader::LastCost => "Ult. Costo",
            CanonicalHeader::LastSupplier => "Ult.Pro",
            CanonicalHeader::Vat => "IVA",
            CanonicalHeader::Code => "Cod.",
            CanonicalHeader::Store => "Tienda",
            CanonicalHeader::ArticleCode => "Cód. Art.",
            CanonicalHeader::RetailPrice => "P.V.P.",
            CanonicalHeader::PromoPrice => "PVP Oferta",
            CanonicalHeader::PromoStart => "Fec.Ini.Ofe.",
            CanonicalHeader::PromoEnd => "Fec.Fin.Ofe.",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.label() == label)
    }
}

impl fmt::Display for CanonicalHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Field key
// ============================================================================

/// Ключ поля записи: каноническая колонка или исходный заголовок как есть
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Canonical(CanonicalHeader),
    Other(String),
}

impl FieldKey {
    /// A pass-through label equal to a stored canonical label is the canonical key.
    pub fn from_label(label: &str) -> Self {
        match CanonicalHeader::from_label(label) {
            Some(header) => FieldKey::Canonical(header),
            None => FieldKey::Other(label.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKey::Canonical(header) => header.label(),
            FieldKey::Other(label) => label,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl From<CanonicalHeader> for FieldKey {
    fn from(header: CanonicalHeader) -> Self {
        FieldKey::Canonical(header)
    }
}

impl From<&str> for FieldKey {
    fn from(label: &str) -> Self {
        FieldKey::from_label(label)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Record
// ============================================================================

/// Строка прайс-листа: упорядоченное (по колонкам файла) отображение ключ → значение.
/// Все значения остаются строками, типы интерпретируют потребители.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(FieldKey, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value; an existing key keeps its position and gets the new value.
    pub fn set(&mut self, key: impl Into<FieldKey>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: impl Into<FieldKey>) -> Option<&str> {
        let key = key.into();
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.fields.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.fields.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl<K: Into<FieldKey>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::new();
        while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "field '{}' must be a scalar, got {}",
                        key, other
                    )))
                }
            };
            record.set(FieldKey::from_label(&key), value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for header in CanonicalHeader::ALL {
            assert_eq!(CanonicalHeader::from_label(header.label()), Some(header));
        }
        assert_eq!(CanonicalHeader::from_label("Referencias"), None);
    }

    #[test]
    fn test_passthrough_label_resolves_to_canonical() {
        assert_eq!(
            FieldKey::from_label("Cód. Art."),
            FieldKey::Canonical(CanonicalHeader::ArticleCode)
        );
        assert_eq!(FieldKey::from_label("Stock"), FieldKey::Other("Stock".into()));
    }

    #[test]
    fn test_set_keeps_first_position() {
        let mut record = Record::new();
        record.set(CanonicalHeader::Reference, "001");
        record.set("Stock", "5");
        record.set(CanonicalHeader::Reference, "002");

        let keys: Vec<&str> = record.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Referencia", "Stock"]);
        assert_eq!(record.get(CanonicalHeader::Reference), Some("002"));
    }

    #[test]
    fn test_serde_preserves_column_order() {
        let record: Record = vec![
            (FieldKey::from(CanonicalHeader::Store), "01"),
            (FieldKey::from(CanonicalHeader::ArticleCode), "A1"),
            (FieldKey::from(CanonicalHeader::RetailPrice), "2,50"),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Tienda":"01","Cód. Art.":"A1","P.V.P.":"2,50"}"#);

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_scalars_as_strings() {
        let record: Record = serde_json::from_str(r#"{"IVA": 21, "Familia": null}"#).unwrap();
        assert_eq!(record.get(CanonicalHeader::Vat), Some("21"));
        assert_eq!(record.get(CanonicalHeader::Family), Some(""));

        let nested: Result<Record, _> = serde_json::from_str(r#"{"IVA": [1]}"#);
        assert!(nested.is_err());
    }
}
