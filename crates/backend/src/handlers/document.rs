use axum::{extract::State, Json};
use serde_json::Value;

use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;

/// GET /api/document
///
/// Весь документ; у пользователей поле `clave` не отдаётся
pub async fn read(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let document = state.store.read().await?;
    let mut value = serde_json::to_value(&document).map_err(|e| {
        contracts::usecases::common::UseCaseError::internal("Error al leer los datos.")
            .with_details(e.to_string())
    })?;

    if let Some(users) = value.get_mut("users").and_then(Value::as_array_mut) {
        for user in users.iter_mut().filter_map(Value::as_object_mut) {
            user.remove("clave");
        }
    }
    Ok(Json(value))
}
