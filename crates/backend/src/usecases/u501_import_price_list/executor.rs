use chrono::Utc;
use contracts::domain::common::DocumentPatch;
use contracts::shared::price_list::{CanonicalHeader, FieldKey, Record};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_price_list::{ImportPriceList, ImportSummary, PriceListKind};
use std::sync::Arc;
use thiserror::Error;

use super::parser::{parse_bytes, IngestError};
use crate::shared::data::{DocumentStore, StoreError};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),
}

/// Executor для UseCase загрузки прайс-листов (артикулы / тарифы)
pub struct PriceListExecutor {
    store: Arc<dyn DocumentStore>,
}

impl PriceListExecutor {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Разобрать загруженный файл и заменить соответствующий список в документе.
    /// Предупреждения возвращаются в сводке и не блокируют загрузку.
    pub async fn import(
        &self,
        kind: PriceListKind,
        bytes: &[u8],
    ) -> Result<ImportSummary, ImportError> {
        tracing::info!(
            "{}: importing {} ({} bytes)",
            ImportPriceList::full_name(),
            kind,
            bytes.len()
        );

        let records = parse_bytes(bytes)?;
        let warnings = check_key_columns(kind, &records);
        for warning in &warnings {
            tracing::warn!("{}: {}", ImportPriceList::full_name(), warning);
        }

        let columns = records
            .first()
            .map(|r| r.keys().map(|k| k.to_string()).collect())
            .unwrap_or_default();
        let row_count = records.len();
        let last_updated = Utc::now().to_rfc3339();

        let mut patch = DocumentPatch {
            last_updated: Some(last_updated.clone()),
            ..Default::default()
        };
        match kind {
            PriceListKind::Articles => patch.articles = Some(records),
            PriceListKind::Tariffs => patch.tariffs = Some(records),
        }
        self.store.merge_update(patch).await?;

        tracing::info!(
            "{}: {} rows of {} stored",
            ImportPriceList::full_name(),
            row_count,
            kind
        );

        Ok(ImportSummary {
            kind,
            row_count,
            columns,
            warnings,
            last_updated,
        })
    }

    /// Текущий список в виде CSV с `;`
    pub async fn export_csv(&self, kind: PriceListKind) -> Result<Vec<u8>, ImportError> {
        let document = self.store.read().await?;
        let records = match kind {
            PriceListKind::Articles => &document.articles,
            PriceListKind::Tariffs => &document.tariffs,
        };
        write_csv(records)
    }
}

/// Key columns are checked on the first record only; an empty value counts as missing.
pub fn check_key_columns(kind: PriceListKind, records: &[Record]) -> Vec<String> {
    let Some(first) = records.first() else {
        return vec!["El archivo no contiene filas de datos.".to_string()];
    };

    let present = |header: CanonicalHeader| first.get(header).is_some_and(|v| !v.is_empty());

    match kind {
        PriceListKind::Articles if !present(CanonicalHeader::Reference) => vec![
            "No se detectó la columna 'Referencia'. Revisa las cabeceras del CSV.".to_string(),
        ],
        PriceListKind::Tariffs
            if !present(CanonicalHeader::Store) && !present(CanonicalHeader::ArticleCode) =>
        {
            vec!["No se detectaron columnas clave (Tienda, Cód. Art.). Revisa el CSV.".to_string()]
        }
        _ => Vec::new(),
    }
}

/// Header row is the union of record keys in first-seen order. Values are
/// written verbatim, so the output parses back into the same records as long
/// as no value contains `;` or a line break.
pub fn write_csv(records: &[Record]) -> Result<Vec<u8>, ImportError> {
    let mut headers: Vec<&FieldKey> = Vec::new();
    for key in records.iter().flat_map(|r| r.keys()) {
        if !headers.contains(&key) {
            headers.push(key);
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if headers.is_empty() {
        return Ok(Vec::new());
    }

    writer.write_record(headers.iter().map(|k| k.as_str()))?;
    for record in records {
        writer.write_record(
            headers
                .iter()
                .map(|k| record.get((*k).clone()).unwrap_or("")),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| ImportError::Export(e.into_error().into()))
}
