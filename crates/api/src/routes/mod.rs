pub mod activity;
pub mod assistant;
pub mod auth;
pub mod bot;
pub mod contact;
pub mod expense;
pub mod export;
pub mod notification;
pub mod opportunity;
pub mod plan;
pub mod settings;
pub mod user;

use bson::oid::ObjectId;
use fluxo_db::models::User;
use fluxo_services::access::{self, Feature};

use crate::{error::ApiError, state::AppState};

pub(crate) fn parse_oid(value: &str, field: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(value).map_err(|_| ApiError::BadRequest(format!("Invalid {field}")))
}

/// Loads the caller's user record and enforces the plan feature gate.
/// Admins pass regardless of their plan.
pub(crate) async fn require_feature(
    state: &AppState,
    user_id: ObjectId,
    feature: Feature,
) -> Result<User, ApiError> {
    let user = state.users.base.find_by_id(user_id).await?;
    let plan = state.plan_for(&user).await?;
    if !access::can_access_feature(&user, feature, Some(&plan)) {
        return Err(ApiError::Forbidden(
            "Feature not available on your plan".to_string(),
        ));
    }
    Ok(user)
}
