use contracts::domain::a001_point_of_sale::PointOfSale;
use contracts::domain::a002_group::Group;
use contracts::domain::common::ApplicationDocument;

pub const DEMO_COMPANY_NAME: &str = "Consulta de Tarifas (DEMO)";

/// Документ, с которым стартует пустое хранилище (демо-режим)
pub fn demo_document() -> ApplicationDocument {
    ApplicationDocument {
        users: Vec::new(),
        pos: vec![
            PointOfSale {
                id: "pos1".to_string(),
                code: "01".to_string(),
                zone: "CH1".to_string(),
                group: "Grupo A".to_string(),
                address: "C/ Mayor 1".to_string(),
                town: "Madrid".to_string(),
            },
            PointOfSale {
                id: "pos2".to_string(),
                code: "02".to_string(),
                zone: "ZN1".to_string(),
                group: "Grupo A".to_string(),
                address: "Oficina Central".to_string(),
                town: "Madrid".to_string(),
            },
        ],
        groups: vec![
            Group {
                id: "g1".to_string(),
                name: "Grupo A".to_string(),
            },
            Group {
                id: "g2".to_string(),
                name: "Grupo B".to_string(),
            },
        ],
        company_name: Some(DEMO_COMPANY_NAME.to_string()),
        ..Default::default()
    }
}

/// Демо-режим определяется по названию компании
pub fn is_demo(document: &ApplicationDocument) -> bool {
    document
        .company_name
        .as_deref()
        .is_some_and(|name| name.contains("(DEMO)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_document() {
        let doc = demo_document();
        assert!(is_demo(&doc));
        assert!(doc.users.is_empty());
        let zones: Vec<&str> = doc.pos.iter().map(|p| p.zone.as_str()).collect();
        assert_eq!(zones, vec!["CH1", "ZN1"]);
        assert!(!is_demo(&ApplicationDocument::default()));
    }
}
