use axum::{
    Json,
    extract::{Path, State},
};
use bson::DateTime;
use fluxo_db::models::{Opportunity, OpportunityStatus};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::parse_oid;

#[derive(Debug, Deserialize)]
pub struct SaveOpportunityRequest {
    pub id: Option<String>,
    pub contact_id: String,
    pub product: String,
    pub value: f64,
    pub status: OpportunityStatus,
}

#[derive(Debug, Serialize)]
pub struct OpportunityResponse {
    pub id: String,
    pub contact_id: String,
    pub contact_name: String,
    pub product: String,
    pub value: f64,
    pub status: OpportunityStatus,
    pub status_label: &'static str,
    pub created_at: i64,
    pub updated_at: i64,
}

fn to_response(o: Opportunity) -> OpportunityResponse {
    OpportunityResponse {
        id: o.id.map(|id| id.to_hex()).unwrap_or_default(),
        contact_id: o.contact_id.to_hex(),
        contact_name: o.contact_name,
        product: o.product,
        value: o.value,
        status: o.status,
        status_label: o.status.label(),
        created_at: o.created_at.timestamp_millis(),
        updated_at: o.updated_at.timestamp_millis(),
    }
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<OpportunityResponse>>, ApiError> {
    let opportunities = state.opportunities.list(auth.user_id).await?;
    Ok(Json(opportunities.into_iter().map(to_response).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(opportunity_id): Path<String>,
) -> Result<Json<OpportunityResponse>, ApiError> {
    let id = parse_oid(&opportunity_id, "opportunity_id")?;
    let opportunity = state.opportunities.get(auth.user_id, id).await?;
    Ok(Json(to_response(opportunity)))
}

pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveOpportunityRequest>,
) -> Result<Json<OpportunityResponse>, ApiError> {
    let id = body.id.as_deref().map(|s| parse_oid(s, "id")).transpose()?;
    let contact_id = parse_oid(&body.contact_id, "contact_id")?;

    // The referenced contact must belong to the caller; its name is
    // snapshotted onto the opportunity at save time.
    let contact = state.contacts.get(auth.user_id, contact_id).await?;

    let now = DateTime::now();
    let (created_at, contact_name, is_new) = match id {
        Some(id) => {
            let existing = state.opportunities.get(auth.user_id, id).await?;
            // The snapshot survives contact renames but refreshes when
            // the opportunity is pointed at a different contact.
            let name = if existing.contact_id == contact_id {
                existing.contact_name
            } else {
                contact.name.clone()
            };
            (existing.created_at, name, false)
        }
        None => (now, contact.name.clone(), true),
    };

    if is_new {
        let user = state.users.base.find_by_id(auth.user_id).await?;
        let plan = state.plan_for(&user).await?;
        let count = state.opportunities.count(auth.user_id).await?;
        if !user.is_admin() && !fluxo_services::access::can_create(count, plan.max_opportunities) {
            return Err(ApiError::Forbidden(
                "Opportunity limit reached for your plan".to_string(),
            ));
        }
    }

    let opportunity = state
        .opportunities
        .save(Opportunity {
            id,
            user_id: auth.user_id,
            contact_id,
            contact_name,
            product: body.product,
            value: body.value,
            status: body.status,
            created_at,
            updated_at: now,
        })
        .await?;

    Ok(Json(to_response(opportunity)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(opportunity_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_oid(&opportunity_id, "opportunity_id")?;
    state.opportunities.delete(auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
