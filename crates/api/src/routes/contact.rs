use axum::{
    Json,
    extract::{Path, State},
};
use bson::DateTime;
use fluxo_db::models::Contact;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::parse_oid;

#[derive(Debug, Deserialize)]
pub struct SaveContactRequest {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: Option<String>,
    /// Epoch milliseconds; defaults to now when omitted.
    pub last_interaction: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub last_interaction: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

fn to_response(c: Contact) -> ContactResponse {
    ContactResponse {
        id: c.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: c.name,
        company: c.company,
        email: c.email,
        phone: c.phone,
        address: c.address,
        last_interaction: c.last_interaction.timestamp_millis(),
        created_at: c.created_at.timestamp_millis(),
        updated_at: c.updated_at.timestamp_millis(),
    }
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ContactResponse>>, ApiError> {
    let contacts = state.contacts.list(auth.user_id).await?;
    Ok(Json(contacts.into_iter().map(to_response).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<ContactResponse>, ApiError> {
    let id = parse_oid(&contact_id, "contact_id")?;
    let contact = state.contacts.get(auth.user_id, id).await?;
    Ok(Json(to_response(contact)))
}

pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let id = body.id.as_deref().map(|s| parse_oid(s, "id")).transpose()?;
    let now = DateTime::now();

    // The contact cap only applies when appending a new record.
    let (created_at, is_new) = match id {
        Some(id) => (state.contacts.get(auth.user_id, id).await?.created_at, false),
        None => (now, true),
    };
    if is_new {
        let user = state.users.base.find_by_id(auth.user_id).await?;
        let plan = state.plan_for(&user).await?;
        let count = state.contacts.count(auth.user_id).await?;
        if !user.is_admin() && !fluxo_services::access::can_create(count, plan.max_contacts) {
            return Err(ApiError::Forbidden(
                "Contact limit reached for your plan".to_string(),
            ));
        }
    }

    let contact = state
        .contacts
        .save(Contact {
            id,
            user_id: auth.user_id,
            name: body.name,
            company: body.company,
            email: body.email,
            phone: body.phone,
            address: body.address,
            last_interaction: body
                .last_interaction
                .map(DateTime::from_millis)
                .unwrap_or(now),
            created_at,
            updated_at: now,
        })
        .await?;

    Ok(Json(to_response(contact)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_oid(&contact_id, "contact_id")?;
    state.contacts.delete(auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
