use contracts::shared::price_list::{CanonicalHeader, FieldKey};

type Rule = (fn(&str) -> bool, CanonicalHeader);

/// Ordered classifier: the first matching predicate wins.
/// Predicates receive the normalized header (see [`normalize_header`]).
const RULES: [Rule; 14] = [
    (
        |h| h.contains("referencia") || h == "ref",
        CanonicalHeader::Reference,
    ),
    (
        |h| h.contains("seccion") || h.contains("sección"),
        CanonicalHeader::Section,
    ),
    (
        |h| h.contains("descripcion") || h.contains("descripción") || h == "desc",
        CanonicalHeader::Description,
    ),
    (|h| h.contains("familia"), CanonicalHeader::Family),
    (
        |h| h.contains("ult") && (h.contains("costo") || h.contains("coste")),
        CanonicalHeader::LastCost,
    ),
    (
        |h| h.contains("ult") && h.contains("pro"),
        CanonicalHeader::LastSupplier,
    ),
    (|h| h == "iva", CanonicalHeader::Vat),
    (|h| h == "cod" || h == "código", CanonicalHeader::Code),
    (
        |h| h.contains("tienda") || h.contains("centro"),
        CanonicalHeader::Store,
    ),
    (
        |h| h.contains("cod") && h.contains("art"),
        CanonicalHeader::ArticleCode,
    ),
    (|h| h == "pvp" || h == "p.v.p.", CanonicalHeader::RetailPrice),
    (
        |h| h.contains("oferta") && h.contains("pvp"),
        CanonicalHeader::PromoPrice,
    ),
    (
        |h| h.contains("ini") && h.contains("ofe"),
        CanonicalHeader::PromoStart,
    ),
    (
        |h| h.contains("fin") && h.contains("ofe"),
        CanonicalHeader::PromoEnd,
    ),
];

/// Strips one leading and one trailing `"`.
pub fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

/// trim -> lowercase -> strip quotes -> remove every `.`
pub fn normalize_header(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    strip_quotes(&lower).replace('.', "")
}

/// Header of a price-list column as a record key.
///
/// Unmatched headers pass through trimmed and quote-stripped, case preserved.
/// An empty result means the column is ignored.
pub fn classify(raw: &str) -> FieldKey {
    let normalized = normalize_header(raw);
    RULES
        .iter()
        .find(|(matches, _)| matches(&normalized))
        .map(|(_, header)| FieldKey::Canonical(*header))
        .unwrap_or_else(|| FieldKey::from_label(strip_quotes(raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(raw: &str) -> Option<CanonicalHeader> {
        match classify(raw) {
            FieldKey::Canonical(h) => Some(h),
            FieldKey::Other(_) => None,
        }
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  \"Cod. Art.\" "), "cod art");
        assert_eq!(normalize_header("P.V.P."), "pvp");
        assert_eq!(normalize_header("\"\""), "");
    }

    #[test]
    fn test_article_code_variants() {
        assert_eq!(canonical("Cod. Art."), Some(CanonicalHeader::ArticleCode));
        assert_eq!(canonical("Cód. Art."), Some(CanonicalHeader::ArticleCode));
        assert_eq!(canonical("COD ARTICULO"), Some(CanonicalHeader::ArticleCode));
    }

    #[test]
    fn test_rule_order() {
        // "cod" alone is the store code, before the article-code rule
        assert_eq!(canonical("Cod."), Some(CanonicalHeader::Code));
        assert_eq!(canonical("Código"), Some(CanonicalHeader::Code));
        // store rule fires before article code
        assert_eq!(canonical("Cod. Tienda"), Some(CanonicalHeader::Store));
        // last cost is checked before last supplier
        assert_eq!(canonical("Ult. Coste Proveedor"), Some(CanonicalHeader::LastCost));
        assert_eq!(canonical("Ult. Proveedor"), Some(CanonicalHeader::LastSupplier));
        assert_eq!(canonical("PVP Oferta"), Some(CanonicalHeader::PromoPrice));
        assert_eq!(canonical("Fec. Ini. Oferta"), Some(CanonicalHeader::PromoStart));
        assert_eq!(canonical("Fec. Fin. Oferta"), Some(CanonicalHeader::PromoEnd));
    }

    #[test]
    fn test_common_headers() {
        assert_eq!(canonical("\"Referencia\""), Some(CanonicalHeader::Reference));
        assert_eq!(canonical("REF"), Some(CanonicalHeader::Reference));
        assert_eq!(canonical("Sección"), Some(CanonicalHeader::Section));
        assert_eq!(canonical("desc"), Some(CanonicalHeader::Description));
        assert_eq!(canonical("Familia"), Some(CanonicalHeader::Family));
        assert_eq!(canonical("I.V.A."), Some(CanonicalHeader::Vat));
        assert_eq!(canonical("Centro"), Some(CanonicalHeader::Store));
        assert_eq!(canonical("p.v.p."), Some(CanonicalHeader::RetailPrice));
    }

    #[test]
    fn test_unmatched_passes_through() {
        assert_eq!(classify("  \"Stock Actual\" "), FieldKey::Other("Stock Actual".into()));
        assert!(classify("  ").is_empty());
        assert!(classify("\"\"").is_empty());
    }
}
