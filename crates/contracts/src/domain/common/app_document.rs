use serde::{Deserialize, Serialize};

use crate::domain::a001_point_of_sale::PointOfSale;
use crate::domain::a002_group::Group;
use crate::domain::a003_family::Family;
use crate::domain::a004_report::Report;
use crate::shared::backup::Snapshot;
use crate::shared::price_list::Record;
use crate::system::users::User;

/// The single root document holding all persisted application state.
///
/// `users`, `pos` and `groups` are required when deserializing: a JSON value
/// without them is not a document. The remaining collections default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDocument {
    pub users: Vec<User>,

    pub pos: Vec<PointOfSale>,

    pub groups: Vec<Group>,

    #[serde(default)]
    pub families: Vec<Family>,

    #[serde(rename = "articulos", default)]
    pub articles: Vec<Record>,

    #[serde(rename = "tarifas", default)]
    pub tariffs: Vec<Record>,

    #[serde(default)]
    pub reports: Vec<Report>,

    #[serde(rename = "backups", default)]
    pub snapshots: Vec<Snapshot>,

    #[serde(rename = "companyName", default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(rename = "lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Partial document for a shallow top-level merge: every present key replaces
/// the stored value wholesale, absent keys are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec<PointOfSale>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Group>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<Family>>,

    #[serde(rename = "articulos", skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<Record>>,

    #[serde(rename = "tarifas", skip_serializing_if = "Option::is_none")]
    pub tariffs: Option<Vec<Record>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports: Option<Vec<Report>>,

    #[serde(rename = "backups", skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<Vec<Snapshot>>,

    #[serde(rename = "companyName", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl DocumentPatch {
    pub fn is_empty(&self) -> bool {
        *self == DocumentPatch::default()
    }

    /// Names of the top-level keys this patch replaces (stored JSON names)
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.users.is_some() {
            keys.push("users");
        }
        if self.pos.is_some() {
            keys.push("pos");
        }
        if self.groups.is_some() {
            keys.push("groups");
        }
        if self.families.is_some() {
            keys.push("families");
        }
        if self.articles.is_some() {
            keys.push("articulos");
        }
        if self.tariffs.is_some() {
            keys.push("tarifas");
        }
        if self.reports.is_some() {
            keys.push("reports");
        }
        if self.snapshots.is_some() {
            keys.push("backups");
        }
        if self.company_name.is_some() {
            keys.push("companyName");
        }
        if self.last_updated.is_some() {
            keys.push("lastUpdated");
        }
        keys
    }
}

impl ApplicationDocument {
    /// Shallow merge of `patch` into the document.
    pub fn apply(&mut self, patch: DocumentPatch) {
        let DocumentPatch {
            users,
            pos,
            groups,
            families,
            articles,
            tariffs,
            reports,
            snapshots,
            company_name,
            last_updated,
        } = patch;

        if let Some(v) = users {
            self.users = v;
        }
        if let Some(v) = pos {
            self.pos = v;
        }
        if let Some(v) = groups {
            self.groups = v;
        }
        if let Some(v) = families {
            self.families = v;
        }
        if let Some(v) = articles {
            self.articles = v;
        }
        if let Some(v) = tariffs {
            self.tariffs = v;
        }
        if let Some(v) = reports {
            self.reports = v;
        }
        if let Some(v) = snapshots {
            self.snapshots = v;
        }
        if let Some(v) = company_name {
            self.company_name = Some(v);
        }
        if let Some(v) = last_updated {
            self.last_updated = Some(v);
        }
    }

    /// Copy of the document with the snapshot list emptied
    pub fn without_snapshots(&self) -> ApplicationDocument {
        ApplicationDocument {
            snapshots: Vec::new(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_group::Group;

    fn group(id: &str, name: &str) -> Group {
        Group {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_apply_replaces_only_present_keys() {
        let mut doc = ApplicationDocument {
            groups: vec![group("g1", "Grupo A")],
            company_name: Some("Carnes SL".to_string()),
            ..Default::default()
        };

        doc.apply(DocumentPatch {
            groups: Some(vec![group("g2", "Grupo B")]),
            ..Default::default()
        });

        assert_eq!(doc.groups, vec![group("g2", "Grupo B")]);
        assert_eq!(doc.company_name.as_deref(), Some("Carnes SL"));
    }

    #[test]
    fn test_patch_keys() {
        let patch = DocumentPatch {
            tariffs: Some(vec![]),
            last_updated: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(patch.keys(), vec!["tarifas", "lastUpdated"]);
        assert!(!patch.is_empty());
        assert!(DocumentPatch::default().is_empty());
    }

    #[test]
    fn test_missing_core_collections_is_not_a_document() {
        let result: Result<ApplicationDocument, _> =
            serde_json::from_str(r#"{"users": [], "groups": []}"#);
        assert!(result.is_err());

        let doc: ApplicationDocument =
            serde_json::from_str(r#"{"users": [], "pos": [], "groups": []}"#).unwrap();
        assert!(doc.families.is_empty());
        assert!(doc.snapshots.is_empty());
    }

    #[test]
    fn test_stored_key_names() {
        let doc = ApplicationDocument {
            company_name: Some("Demo".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&doc).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["users", "pos", "groups", "families", "articulos", "tarifas", "reports", "backups", "companyName"] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert!(!obj.contains_key("lastUpdated"));
    }
}
