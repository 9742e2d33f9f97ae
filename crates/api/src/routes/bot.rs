use axum::{Json, extract::State};
use fluxo_db::models::BotConfig;
use fluxo_services::access::Feature;
use fluxo_services::assistant::{ChatTurn, bot};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::require_feature;

#[derive(Debug, Deserialize)]
pub struct SaveBotConfigRequest {
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default)]
    pub bot_name: String,
    pub business_description: Option<String>,
    pub products_and_prices: Option<String>,
    pub operating_hours: Option<String>,
    pub communication_tone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BotConfigResponse {
    pub whatsapp_number: String,
    pub bot_name: String,
    pub business_description: Option<String>,
    pub products_and_prices: Option<String>,
    pub operating_hours: Option<String>,
    pub communication_tone: Option<String>,
    pub is_connected: bool,
    pub last_connection: Option<i64>,
}

fn to_response(c: BotConfig) -> BotConfigResponse {
    BotConfigResponse {
        whatsapp_number: c.whatsapp_number,
        bot_name: c.bot_name,
        business_description: c.business_description,
        products_and_prices: c.products_and_prices,
        operating_hours: c.operating_hours,
        communication_tone: c.communication_tone,
        is_connected: c.is_connected,
        last_connection: c.last_connection.map(|d| d.timestamp_millis()),
    }
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BotConfigResponse>, ApiError> {
    let config = state.bots.get(auth.user_id).await?;
    Ok(Json(to_response(config)))
}

pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveBotConfigRequest>,
) -> Result<Json<BotConfigResponse>, ApiError> {
    let existing = state.bots.get(auth.user_id).await?;

    let mut config = BotConfig {
        id: existing.id,
        user_id: auth.user_id,
        whatsapp_number: body.whatsapp_number,
        bot_name: body.bot_name,
        business_description: body.business_description,
        products_and_prices: body.products_and_prices,
        operating_hours: body.operating_hours,
        communication_tone: body.communication_tone,
        system_instructions: String::new(),
        is_connected: existing.is_connected,
        last_connection: existing.last_connection,
    };
    config.system_instructions = bot::bot_instruction(&config);

    let saved = state.bots.save(config).await?;
    Ok(Json(to_response(saved)))
}

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub config: BotConfigResponse,
    pub greeting: String,
}

pub async fn connect(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ConnectResponse>, ApiError> {
    let config = state.bots.get(auth.user_id).await?;
    if config.bot_name.trim().is_empty() {
        return Err(ApiError::Validation(
            "Configure the bot name before connecting".to_string(),
        ));
    }

    // Pairing is simulated; the key must exist for the bot to answer.
    let settings = state.user_settings.get(auth.user_id).await?;
    if !state.assistant.is_available(settings.google_api_key.as_deref()) {
        return Err(ApiError::BadRequest(
            "Chave de API não configurada. Adicione sua chave nas configurações.".to_string(),
        ));
    }

    let config = state.bots.set_connected(auth.user_id, true).await?;
    let greeting = bot::bot_greeting(&config);
    Ok(Json(ConnectResponse {
        config: to_response(config),
        greeting,
    }))
}

pub async fn disconnect(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BotConfigResponse>, ApiError> {
    let config = state.bots.set_connected(auth.user_id, false).await?;
    Ok(Json(to_response(config)))
}

#[derive(Debug, Deserialize)]
pub struct BotChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct BotChatResponse {
    pub text: String,
}

/// Simulator chat: speaks as the configured bot and may register leads.
pub async fn chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<BotChatRequest>,
) -> Result<Json<BotChatResponse>, ApiError> {
    require_feature(&state, auth.user_id, Feature::AiAssistant).await?;

    let config = state.bots.get(auth.user_id).await?;
    if !config.is_connected {
        return Err(ApiError::BadRequest("Bot is not connected".to_string()));
    }

    let settings = state.user_settings.get(auth.user_id).await?;
    let instruction = bot::bot_instruction(&config);

    let reply = state
        .assistant
        .chat(
            auth.user_id,
            settings.google_api_key.as_deref(),
            &instruction,
            &body.history,
            &body.message,
            true,
        )
        .await?;

    Ok(Json(BotChatResponse { text: reply.text }))
}
