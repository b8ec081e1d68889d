use axum::extract::{Json, State};
use contracts::system::auth::{LoginRequest, LoginResponse, TokenClaims};
use contracts::system::users::UserInfo;

use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, AuthError};
use crate::system::users::service as user_service;

/// Login handler
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // Verify credentials
    let authenticated = user_service::verify_credentials(
        state.store.as_ref(),
        &request.username,
        &request.password,
        state.auth.emergency_admin,
    )
    .await
    .map_err(AuthError::from)?
    .ok_or(AuthError::InvalidCredentials)?;

    let user = &authenticated.user;
    let access_token = jwt::generate_access_token(&state.auth, &user.id, &user.name, user.role)
        .map_err(AuthError::from)?;

    tracing::info!(
        "User '{}' logged in (role {:?}, emergency: {})",
        user.name,
        user.role,
        authenticated.emergency
    );

    Ok(Json(LoginResponse {
        access_token,
        user: UserInfo::from(user),
        emergency: authenticated.emergency,
    }))
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Json<TokenClaims> {
    Json(claims)
}
