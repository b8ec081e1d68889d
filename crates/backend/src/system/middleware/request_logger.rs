use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::format_number;

/// Цвет времени в консоли: голубой для 2xx, жёлтый для 4xx, красный для 5xx
fn status_color(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "31"
    } else if status.is_client_error() {
        "33"
    } else {
        "36"
    }
}

fn print_line(status: StatusCode, millis: u128, size: &str, method: &str, path: &str) {
    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(status),
        Local::now().format("%H:%M:%S"),
        millis,
        size,
        status.as_u16(),
        method,
        path
    );
}

/// Middleware для логирования HTTP запросов
///
/// Одна строка на запрос: время, длительность, размер ответа, статус, метод и путь.
/// Размер берётся из `Content-Length`; если его нет, тело читается целиком.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let status = response.status();

    let known_size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    if let Some(size) = known_size {
        print_line(status, start.elapsed().as_millis(), &format_number(size), &method, &path);
        tracing::debug!("{} {} -> {} ({} bytes)", method, path, status.as_u16(), size);
        return response;
    }

    let (parts, body) = response.into_parts();
    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            print_line(
                status,
                start.elapsed().as_millis(),
                &format_number(bytes.len()),
                &method,
                &path,
            );
            tracing::debug!("{} {} -> {} ({} bytes)", method, path, status.as_u16(), bytes.len());
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            print_line(status, start.elapsed().as_millis(), "error", &method, &path);
            tracing::warn!("{} {}: failed to read response body: {}", method, path, e);
            Response::from_parts(parts, Body::default())
        }
    }
}
