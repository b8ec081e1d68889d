pub mod a001_point_of_sale;
pub mod a002_group;
pub mod a003_family;
pub mod a004_report;
pub mod assistant;
pub mod document;
pub mod settings;
pub mod usecases;

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

/// Ответ-файл для скачивания с `Content-Disposition: attachment`
pub fn attachment(filename: &str, content_type: &'static str, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', "_"));
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_headers() {
        let response = attachment("reporte_Ana_López.csv", "text/csv; charset=utf-8", b"a;b\n".to_vec());
        let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap();
        assert_eq!(
            disposition.as_bytes(),
            "attachment; filename=\"reporte_Ana_López.csv\"".as_bytes()
        );
    }
}
