use axum::{Json, extract::State};
use fluxo_db::models::UserSettings;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    #[serde(default)]
    pub notifications_enabled: bool,
    pub activity_alert_minutes: i64,
    pub google_api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub notifications_enabled: bool,
    pub activity_alert_minutes: i64,
    /// Key presence only; the stored key never leaves the server.
    pub has_google_api_key: bool,
}

fn to_response(s: UserSettings) -> SettingsResponse {
    SettingsResponse {
        notifications_enabled: s.notifications_enabled,
        activity_alert_minutes: s.activity_alert_minutes,
        has_google_api_key: s
            .google_api_key
            .as_deref()
            .is_some_and(|k| !k.is_empty()),
    }
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = state.user_settings.get(auth.user_id).await?;
    Ok(Json(to_response(settings)))
}

pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveSettingsRequest>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let existing = state.user_settings.get(auth.user_id).await?;

    // An omitted key keeps the stored one; an empty string clears it.
    let google_api_key = match body.google_api_key {
        Some(key) if key.is_empty() => None,
        Some(key) => Some(key),
        None => existing.google_api_key,
    };

    let saved = state
        .user_settings
        .save(UserSettings {
            id: existing.id,
            user_id: auth.user_id,
            notifications_enabled: body.notifications_enabled,
            activity_alert_minutes: body.activity_alert_minutes,
            google_api_key,
        })
        .await?;

    Ok(Json(to_response(saved)))
}
