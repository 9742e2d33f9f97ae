use axum::{Json, extract::State};
use fluxo_db::models::{PlanConfig, PlanFeatures, PlanType};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    extractors::auth::{AdminUser, AuthUser},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub name: String,
    pub price: f64,
    pub max_contacts: i64,
    pub max_opportunities: i64,
    pub features: PlanFeatures,
}

fn to_response(p: PlanConfig) -> PlanResponse {
    PlanResponse {
        plan_type: p.plan_type,
        name: p.name,
        price: p.price,
        max_contacts: p.max_contacts,
        max_opportunities: p.max_opportunities,
        features: p.features,
    }
}

pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<PlanResponse>>, ApiError> {
    let plans = state.plans.all().await?;
    Ok(Json(plans.into_iter().map(to_response).collect()))
}

/// The caller's effective plan config, after the Basic fallback.
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PlanResponse>, ApiError> {
    let user = state.users.base.find_by_id(auth.user_id).await?;
    let plan = state.plan_for(&user).await?;
    Ok(Json(to_response(plan)))
}

#[derive(Debug, Deserialize)]
pub struct SavePlanRequest {
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub name: String,
    pub price: f64,
    pub max_contacts: i64,
    pub max_opportunities: i64,
    pub features: PlanFeatures,
}

pub async fn save(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<SavePlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    if body.price < 0.0 {
        return Err(ApiError::Validation("Price must not be negative".to_string()));
    }
    if body.max_contacts < -1 || body.max_opportunities < -1 {
        return Err(ApiError::Validation(
            "Limits must be -1 (unlimited) or non-negative".to_string(),
        ));
    }

    let config = PlanConfig {
        id: None,
        plan_type: body.plan_type,
        name: body.name,
        price: body.price,
        max_contacts: body.max_contacts,
        max_opportunities: body.max_opportunities,
        features: body.features,
    };
    state.plans.save(config.clone()).await?;

    Ok(Json(to_response(config)))
}
