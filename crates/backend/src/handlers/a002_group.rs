use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_group::{Group, GroupDto};

use crate::domain::a002_group;
use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/groups
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Group>>> {
    Ok(Json(a002_group::service::list_all(state.store.as_ref()).await?))
}

/// POST /api/groups
pub async fn upsert(
    State(state): State<AppState>,
    Json(dto): Json<GroupDto>,
) -> ApiResult<Json<Group>> {
    Ok(Json(a002_group::service::upsert(state.store.as_ref(), dto).await?))
}

/// DELETE /api/groups/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    a002_group::service::delete(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
