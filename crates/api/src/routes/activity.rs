use axum::{
    Json,
    extract::{Path, State},
};
use bson::DateTime;
use fluxo_db::models::Activity;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::parse_oid;

#[derive(Debug, Deserialize)]
pub struct SaveActivityRequest {
    pub id: Option<String>,
    pub opportunity_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Epoch milliseconds.
    pub date: i64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: String,
    pub opportunity_id: Option<String>,
    pub title: String,
    pub description: String,
    pub date: i64,
    pub completed: bool,
    pub notified: bool,
}

fn to_response(a: Activity) -> ActivityResponse {
    ActivityResponse {
        id: a.id.map(|id| id.to_hex()).unwrap_or_default(),
        opportunity_id: a.opportunity_id.map(|id| id.to_hex()),
        title: a.title,
        description: a.description,
        date: a.date.timestamp_millis(),
        completed: a.completed,
        notified: a.notified,
    }
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ActivityResponse>>, ApiError> {
    let activities = state.activities.list(auth.user_id).await?;
    Ok(Json(activities.into_iter().map(to_response).collect()))
}

pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveActivityRequest>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let id = body.id.as_deref().map(|s| parse_oid(s, "id")).transpose()?;
    let opportunity_id = body
        .opportunity_id
        .as_deref()
        .map(|s| parse_oid(s, "opportunity_id"))
        .transpose()?;

    if let Some(opportunity_id) = opportunity_id {
        state.opportunities.get(auth.user_id, opportunity_id).await?;
    }

    // The notified flag is owned by the scheduler. Rescheduling an
    // activity re-arms it; other edits keep the stored value.
    let notified = match id {
        Some(id) => {
            let existing = state.activities.get(auth.user_id, id).await?;
            existing.notified && existing.date.timestamp_millis() == body.date
        }
        None => false,
    };

    let activity = state
        .activities
        .save(Activity {
            id,
            user_id: auth.user_id,
            opportunity_id,
            title: body.title,
            description: body.description,
            date: DateTime::from_millis(body.date),
            completed: body.completed,
            notified,
        })
        .await?;

    Ok(Json(to_response(activity)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(activity_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_oid(&activity_id, "activity_id")?;
    state.activities.delete(auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
