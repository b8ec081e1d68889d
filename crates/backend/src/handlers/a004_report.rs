use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use contracts::domain::a004_report::{Report, SubmitReportDto};

use super::attachment;
use crate::domain::a004_report;
use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/reports (admin)
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Report>>> {
    Ok(Json(a004_report::service::list_all(state.store.as_ref()).await?))
}

/// POST /api/reports
pub async fn submit(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<SubmitReportDto>,
) -> ApiResult<Json<Report>> {
    let report = a004_report::service::submit(state.store.as_ref(), &claims.username, dto).await?;
    Ok(Json(report))
}

/// GET /api/reports/:id/download
pub async fn download(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Response> {
    let (filename, content) = a004_report::service::download(state.store.as_ref(), &id).await?;
    Ok(attachment(
        &filename,
        "text/csv; charset=utf-8",
        content.into_bytes(),
    ))
}

/// DELETE /api/reports/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    a004_report::service::delete(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
