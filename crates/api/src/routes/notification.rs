use axum::{
    Json,
    extract::{Path, State},
};
use fluxo_db::models::{AppNotification, NotificationKind};
use serde::Serialize;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::parse_oid;

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

fn to_response(n: AppNotification) -> NotificationResponse {
    NotificationResponse {
        id: n.id.map(|id| id.to_hex()).unwrap_or_default(),
        title: n.title,
        message: n.message,
        read: n.read,
        timestamp: n.timestamp.timestamp_millis(),
        kind: n.kind,
    }
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let notifications = state.notifications.list(auth.user_id).await?;
    Ok(Json(notifications.into_iter().map(to_response).collect()))
}

pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_oid(&notification_id, "notification_id")?;
    let updated = state.notifications.mark_read(auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let updated = state.notifications.mark_all_read(auth.user_id).await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}
