use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a003_family::Family;
use serde::Deserialize;

use crate::domain::a003_family;
use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenameFamilyDto {
    #[serde(alias = "nombre")]
    pub name: String,
}

/// GET /api/families
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Family>>> {
    Ok(Json(a003_family::service::list_all(state.store.as_ref()).await?))
}

/// POST /api/families
pub async fn create(
    State(state): State<AppState>,
    Json(family): Json<Family>,
) -> ApiResult<StatusCode> {
    a003_family::service::create(state.store.as_ref(), family).await?;
    Ok(StatusCode::CREATED)
}

/// PUT /api/families/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<RenameFamilyDto>,
) -> ApiResult<StatusCode> {
    a003_family::service::update(state.store.as_ref(), &id, &dto.name).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/families/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    a003_family::service::delete(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
