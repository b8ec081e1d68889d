use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_point_of_sale::{PointOfSale, PointOfSaleDto};

use crate::domain::a001_point_of_sale;
use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/pos
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<PointOfSale>>> {
    Ok(Json(a001_point_of_sale::service::list_all(state.store.as_ref()).await?))
}

/// POST /api/pos
pub async fn upsert(
    State(state): State<AppState>,
    Json(dto): Json<PointOfSaleDto>,
) -> ApiResult<Json<PointOfSale>> {
    Ok(Json(
        a001_point_of_sale::service::upsert(state.store.as_ref(), dto).await?,
    ))
}

/// DELETE /api/pos/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    if !a001_point_of_sale::service::delete(state.store.as_ref(), &id).await? {
        tracing::debug!("Point of sale {} already absent", id);
    }
    Ok(StatusCode::NO_CONTENT)
}
