use chrono::Local;
use contracts::domain::a004_report::{Report, SubmitReportDto};
use contracts::domain::common::{new_id, DocumentPatch};

use crate::shared::data::DocumentStore;
use crate::shared::format::{display_datetime, sanitize_file_part};
use crate::shared::validation::{require, ServiceError};

/// `reporte_<autor>_<fecha>.csv`; `/`, `:` and whitespace become `_`
pub fn report_filename(report: &Report) -> String {
    format!(
        "reporte_{}_{}.csv",
        sanitize_file_part(&report.supervisor_name),
        sanitize_file_part(&report.date)
    )
}

/// Новый отчёт ставится в начало входящих
pub async fn submit(
    store: &dyn DocumentStore,
    supervisor_name: &str,
    dto: SubmitReportDto,
) -> Result<Report, ServiceError> {
    require(&dto.kind, "type")?;

    let report = Report {
        id: new_id(),
        date: display_datetime(&Local::now()),
        supervisor_name: supervisor_name.to_string(),
        zone_filter: dto.zone_filter,
        kind: dto.kind,
        csv_content: dto.csv_content,
        read: false,
    };

    let mut reports = store.read().await?.reports;
    reports.insert(0, report.clone());
    save(store, reports).await?;

    tracing::info!("Report {} submitted by {}", report.id, supervisor_name);
    Ok(report)
}

pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Report>, ServiceError> {
    Ok(store.read().await?.reports)
}

/// (имя файла, CSV). Первое скачивание помечает отчёт прочитанным.
pub async fn download(
    store: &dyn DocumentStore,
    id: &str,
) -> Result<(String, String), ServiceError> {
    let mut reports = store.read().await?.reports;
    let report = reports
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| ServiceError::NotFound("Report", id.to_string()))?;

    let filename = report_filename(report);
    let content = report.csv_content.clone();

    if !report.read {
        report.read = true;
        save(store, reports).await?;
    }
    Ok((filename, content))
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> Result<bool, ServiceError> {
    let mut reports = store.read().await?.reports;
    let before = reports.len();
    reports.retain(|r| r.id != id);
    if reports.len() == before {
        return Ok(false);
    }
    save(store, reports).await?;
    Ok(true)
}

async fn save(store: &dyn DocumentStore, reports: Vec<Report>) -> Result<(), ServiceError> {
    store
        .merge_update(DocumentPatch {
            reports: Some(reports),
            ..Default::default()
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::MemoryStore;
    use contracts::domain::common::ApplicationDocument;

    fn dto() -> SubmitReportDto {
        SubmitReportDto {
            zone_filter: "CH1".to_string(),
            kind: "ofertas".to_string(),
            csv_content: "Cód. Art.;P.V.P.\nA1;2,50\n".to_string(),
        }
    }

    #[test]
    fn test_report_filename() {
        let report = Report {
            id: "r1".into(),
            date: "31/12/2024, 18:05:09".into(),
            supervisor_name: "Ana López".into(),
            zone_filter: String::new(),
            kind: "ofertas".into(),
            csv_content: String::new(),
            read: false,
        };
        assert_eq!(
            report_filename(&report),
            "reporte_Ana_López_31_12_2024,_18_05_09.csv"
        );
    }

    #[tokio::test]
    async fn test_submit_download_marks_read() {
        let store = MemoryStore::new(ApplicationDocument::default());
        submit(&store, "ana", dto()).await.unwrap();
        let second = submit(&store, "luis", dto()).await.unwrap();

        let reports = list_all(&store).await.unwrap();
        assert_eq!(reports[0].id, second.id);
        assert!(!reports[0].read);

        let (filename, content) = download(&store, &second.id).await.unwrap();
        assert!(filename.starts_with("reporte_luis_"));
        assert_eq!(content, dto().csv_content);
        assert!(list_all(&store).await.unwrap()[0].read);
        assert!(!list_all(&store).await.unwrap()[1].read);
    }

    #[tokio::test]
    async fn test_download_and_delete_unknown() {
        let store = MemoryStore::new(ApplicationDocument::default());
        assert!(matches!(
            download(&store, "x").await,
            Err(ServiceError::NotFound(_, _))
        ));
        assert!(!delete(&store, "x").await.unwrap());
    }
}
