use contracts::shared::price_list::{FieldKey, Record};
use thiserror::Error;

use super::header::{classify, strip_quotes};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("El archivo no es texto UTF-8 válido (byte {0})")]
    Decode(usize),
}

/// `;` when the first line has one, `,` otherwise. One decision per file.
pub fn detect_delimiter(first_line: &str) -> u8 {
    if first_line.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Decode an uploaded file and parse it. A leading UTF-8 BOM is ignored.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<Record>, IngestError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let content = std::str::from_utf8(bytes).map_err(|e| IngestError::Decode(e.valid_up_to()))?;
    Ok(parse(content))
}

/// Parse delimited text into records keyed by normalized headers.
///
/// Blank lines are dropped; the first remaining line is the header row.
/// Every other line yields exactly one record with one entry per named header
/// column (missing values are `""`, extra values are dropped). No quoting:
/// a separator inside quotes still splits the field.
pub fn parse(content: &str) -> Vec<Record> {
    let lines: Vec<&str> = content.split('\n').filter(|l| !l.trim().is_empty()).collect();
    let Some(first) = lines.first() else {
        return Vec::new();
    };

    let delimiter = detect_delimiter(first);
    let joined = lines.join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(joined.as_bytes());

    let mut rows = reader.byte_records().map(|row| match row {
        Ok(row) => row
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect::<Vec<String>>(),
        Err(e) => {
            tracing::warn!("Unreadable CSV row kept as empty: {}", e);
            Vec::new()
        }
    });

    let headers: Vec<FieldKey> = rows
        .next()
        .unwrap_or_default()
        .iter()
        .map(|raw| classify(raw))
        .collect();

    let records: Vec<Record> = rows.map(|values| build_record(&headers, &values)).collect();

    tracing::debug!(
        "Parsed {} records, delimiter '{}', {} columns",
        records.len(),
        delimiter as char,
        headers.len()
    );
    records
}

fn build_record(headers: &[FieldKey], values: &[String]) -> Record {
    let mut record = Record::new();
    for (i, key) in headers.iter().enumerate() {
        if key.is_empty() {
            continue;
        }
        let value = values.get(i).map(|v| strip_quotes(v.trim())).unwrap_or("");
        record.set(key.clone(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::price_list::CanonicalHeader;

    #[test]
    fn test_semicolon_file_with_accented_headers() {
        let records = parse("Referencia;Descripción\n001;Jamón\n002;Chorizo");

        let expected: Vec<Record> = vec![
            vec![
                (CanonicalHeader::Reference, "001"),
                (CanonicalHeader::Description, "Jamón"),
            ]
            .into_iter()
            .collect(),
            vec![
                (CanonicalHeader::Reference, "002"),
                (CanonicalHeader::Description, "Chorizo"),
            ]
            .into_iter()
            .collect(),
        ];
        assert_eq!(records, expected);
    }

    #[test]
    fn test_unknown_headers_pass_through() {
        let expected: Record = vec![("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();

        for content in ["a;b;c\n1;2;3", "a,b,c\n1,2,3"] {
            let records = parse(content);
            assert_eq!(records, vec![expected.clone()], "input {:?}", content);
            let keys: Vec<&str> = records[0].keys().map(|k| k.as_str()).collect();
            assert_eq!(keys, vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_row_count_equals_non_blank_data_lines() {
        let content = "\n\nTienda,Cod. Art.,P.V.P.\r\n01,A1,2.50\r\n   \r\n02,A2\r\n\n03,A3,1,extra\n";
        let records = parse(content);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get(CanonicalHeader::Store), Some("01"));
        assert_eq!(records[0].get(CanonicalHeader::ArticleCode), Some("A1"));
        assert_eq!(records[0].get(CanonicalHeader::RetailPrice), Some("2.50"));
        // missing trailing value
        assert_eq!(records[1].get(CanonicalHeader::RetailPrice), Some(""));
        // extra columns are dropped
        assert_eq!(records[2].len(), 3);
    }

    #[test]
    fn test_delimiter_is_decided_by_first_line() {
        assert_eq!(detect_delimiter("a;b"), b';');
        assert_eq!(detect_delimiter("a,b"), b',');
        assert_eq!(detect_delimiter("ab"), b',');

        // comma file: a semicolon in a data line is just text
        let records = parse("Referencia,Familia\n001,A;B\n");
        assert_eq!(records[0].get(CanonicalHeader::Family), Some("A;B"));

        // semicolon file: commas stay inside values (decimal comma)
        let records = parse("Referencia;Ult. Costo\n001;2,75\n");
        assert_eq!(records[0].get(CanonicalHeader::LastCost), Some("2,75"));
    }

    #[test]
    fn test_quotes_are_stripped_not_interpreted() {
        let records = parse("\"Referencia\";\"Stock\"\n\"001\";\" 5 \"\n");
        assert_eq!(records[0].get(CanonicalHeader::Reference), Some("001"));
        assert_eq!(records[0].get("Stock"), Some(" 5 "));

        // separator inside quotes still splits
        let records = parse("Referencia,Descripción\n001,\"Tornillo, M4\"\n");
        assert_eq!(records[0].get(CanonicalHeader::Description), Some("Tornillo"));
    }

    #[test]
    fn test_duplicate_headers_keep_first_position_last_value() {
        let records = parse("Referencia;Ref;Stock\n001;002;9\n");
        let keys: Vec<&str> = records[0].keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Referencia", "Stock"]);
        assert_eq!(records[0].get(CanonicalHeader::Reference), Some("002"));
    }

    #[test]
    fn test_empty_header_column_is_ignored() {
        let records = parse("Referencia;;Stock\n001;x;3\n");
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0].get("Stock"), Some("3"));
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse("").is_empty());
        assert!(parse(" \n\t\n").is_empty());
        assert!(parse("Referencia;Descripción\n").is_empty());
    }

    #[test]
    fn test_values_are_not_coerced() {
        let records = parse("Fec.Ini.Ofe.;IVA\n01/02/2024;021\n");
        assert_eq!(records[0].get(CanonicalHeader::PromoStart), Some("01/02/2024"));
        assert_eq!(records[0].get(CanonicalHeader::Vat), Some("021"));
    }

    #[test]
    fn test_parse_bytes() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Referencia;Sección\n001;Ferretería\n".as_bytes());
        let records = parse_bytes(&bytes).unwrap();
        assert_eq!(records[0].get(CanonicalHeader::Section), Some("Ferretería"));

        let err = parse_bytes(b"Referencia\n\xFF\xFE\n").unwrap_err();
        assert!(matches!(err, IngestError::Decode(11)));
    }
}
