use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;
use contracts::usecases::common::UseCaseError;

use crate::shared::api_error::ApiError;

/// Claims of the authenticated caller, placed into the request by `require_auth`/`require_admin`.
/// Usage in handlers: `async fn handler(CurrentUser(claims): CurrentUser) -> ...`
pub struct CurrentUser(pub TokenClaims);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| UseCaseError::unauthorized("Sesión no iniciada").into())
    }
}
