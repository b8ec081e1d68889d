use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use contracts::system::users::{UpsertUserDto, UserInfo};

use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// List all users (admin only)
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<UserInfo>>> {
    Ok(Json(service::list_all(state.store.as_ref()).await?))
}

/// Create or update user (admin only)
pub async fn upsert(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<UpsertUserDto>,
) -> ApiResult<Json<UserInfo>> {
    let user = service::upsert(state.store.as_ref(), dto).await?;
    tracing::info!("User {} saved by {}", user.id, claims.username);
    Ok(Json(user))
}

/// Delete user (admin only)
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if service::delete(state.store.as_ref(), &id).await? {
        tracing::info!("User {} deleted by {}", id, claims.username);
    }
    Ok(StatusCode::NO_CONTENT)
}
