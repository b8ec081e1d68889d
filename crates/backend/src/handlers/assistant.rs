use axum::{extract::State, Json};
use contracts::shared::assistant::{ChatRequest, ChatResponse};

use crate::shared::api_error::ApiResult;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/assistant/chat
pub async fn chat(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    tracing::debug!("Assistant message from {}", claims.username);
    let reply = state
        .assistant
        .send(&claims.sub, &request.message, &request.context)
        .await?;
    Ok(Json(ChatResponse { reply }))
}
