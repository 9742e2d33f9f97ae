use axum::{Json, extract::State};
use fluxo_services::access::Feature;
use fluxo_services::assistant::{ChatTurn, bot};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::require_feature;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
}

pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    require_feature(&state, auth.user_id, Feature::AiAssistant).await?;

    if body.message.trim().is_empty() {
        return Err(ApiError::Validation("Message must not be empty".to_string()));
    }

    let settings = state.user_settings.get(auth.user_id).await?;
    let instruction = bot::crm_instruction();

    let reply = state
        .assistant
        .chat(
            auth.user_id,
            settings.google_api_key.as_deref(),
            &instruction,
            &body.history,
            &body.message,
            false,
        )
        .await?;

    Ok(Json(ChatResponse {
        text: reply.text,
        navigate_to: reply.navigate_to,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

pub async fn image(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ImageRequest>,
) -> Result<Json<ImageResponse>, ApiError> {
    require_feature(&state, auth.user_id, Feature::AiAssistant).await?;

    if body.prompt.trim().is_empty() {
        return Err(ApiError::Validation("Prompt must not be empty".to_string()));
    }

    let settings = state.user_settings.get(auth.user_id).await?;
    let image = state
        .assistant
        .generate_image(settings.google_api_key.as_deref(), &body.prompt)
        .await?;

    Ok(Json(ImageResponse {
        mime_type: image.mime_type,
        data: image.data,
    }))
}
