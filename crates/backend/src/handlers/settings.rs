use axum::{extract::State, http::StatusCode, Json};
use contracts::domain::common::DocumentPatch;
use contracts::shared::settings::UpdateSettingsDto;

use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;
use crate::shared::validation::require;

/// PUT /api/settings
pub async fn update(
    State(state): State<AppState>,
    Json(dto): Json<UpdateSettingsDto>,
) -> ApiResult<StatusCode> {
    require(&dto.company_name, "companyName")?;

    state
        .store
        .merge_update(DocumentPatch {
            company_name: Some(dto.company_name.trim().to_string()),
            ..Default::default()
        })
        .await?;

    tracing::info!("Company name set to '{}'", dto.company_name.trim());
    Ok(StatusCode::OK)
}
