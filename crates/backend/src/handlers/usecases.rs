use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use contracts::shared::backup::SnapshotInfo;
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_import_price_list::{ImportSummary, PriceListKind};
use contracts::usecases::u502_backup_restore::CreateBackupRequest;

use super::attachment;
use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;
use crate::usecases::{u501_import_price_list, u502_backup_restore};

fn price_list_kind(kind: &str) -> Result<PriceListKind, UseCaseError> {
    kind.parse::<PriceListKind>().map_err(UseCaseError::not_found)
}

// ============================================================================
// u501: price list import
// ============================================================================

/// POST /api/u501/import/:kind (multipart, field "file")
pub async fn u501_import(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportSummary>> {
    let kind = price_list_kind(&kind)?;

    let mut content = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UseCaseError::input_format("Error al recibir el archivo.").with_details(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("").to_string();
            let bytes = field.bytes().await.map_err(|e| {
                UseCaseError::input_format("Error al recibir el archivo.").with_details(e.to_string())
            })?;
            tracing::info!("u501: received '{}' ({} bytes)", filename, bytes.len());
            content = Some(bytes);
            break;
        }
    }

    let content = content.ok_or_else(|| UseCaseError::validation("El campo 'file' es obligatorio."))?;
    let executor = u501_import_price_list::PriceListExecutor::new(state.store.clone());
    Ok(Json(executor.import(kind, &content).await?))
}

/// GET /api/u501/export/:kind
pub async fn u501_export(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Response> {
    let kind = price_list_kind(&kind)?;
    let executor = u501_import_price_list::PriceListExecutor::new(state.store.clone());
    let bytes = executor.export_csv(kind).await?;
    Ok(attachment(
        &format!("{}.csv", kind),
        "text/csv; charset=utf-8",
        bytes,
    ))
}

// ============================================================================
// u502: backups
// ============================================================================

/// GET /api/u502/backups
pub async fn u502_list(State(state): State<AppState>) -> ApiResult<Json<Vec<SnapshotInfo>>> {
    let executor = u502_backup_restore::BackupExecutor::new(state.store.clone());
    Ok(Json(executor.list().await?))
}

/// POST /api/u502/backups
pub async fn u502_create(
    State(state): State<AppState>,
    Json(request): Json<CreateBackupRequest>,
) -> ApiResult<Json<SnapshotInfo>> {
    let executor = u502_backup_restore::BackupExecutor::new(state.store.clone());
    Ok(Json(executor.create(&request.name).await?))
}

/// POST /api/u502/backups/:id/restore
pub async fn u502_restore(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let executor = u502_backup_restore::BackupExecutor::new(state.store.clone());
    executor.restore(&id).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/u502/backups/:id
pub async fn u502_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let executor = u502_backup_restore::BackupExecutor::new(state.store.clone());
    executor.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/u502/export
pub async fn u502_export(State(state): State<AppState>) -> ApiResult<Response> {
    let executor = u502_backup_restore::BackupExecutor::new(state.store.clone());
    let (filename, bytes) = executor.export(&state.export.backup_slug).await?;
    Ok(attachment(&filename, "application/json", bytes))
}

/// POST /api/u502/import (raw JSON body)
pub async fn u502_import(State(state): State<AppState>, body: Bytes) -> ApiResult<StatusCode> {
    let executor = u502_backup_restore::BackupExecutor::new(state.store.clone());
    executor.import(&body).await?;
    Ok(StatusCode::OK)
}
