use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use fluxo_db::models::{PlanType, UserRole};
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

use super::auth::{UserResponse, to_user_response};
use super::parse_oid;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: UserRole,
    pub plan: PlanType,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub plan: Option<PlanType>,
    pub is_active: Option<bool>,
}

pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(to_user_response).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let password_hash = state.auth.hash_password(&body.password)?;
    let user = state
        .users
        .create(
            body.name,
            body.email.to_lowercase(),
            password_hash,
            body.role,
            body.plan,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(to_user_response(&user))))
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_oid(&user_id, "user_id")?;
    let mut user = state.users.base.find_by_id(id).await?;

    if let Some(name) = body.name {
        user.name = name;
    }
    if let Some(email) = body.email {
        user.email = email.to_lowercase();
    }
    if let Some(password) = body.password {
        user.password_hash = Some(state.auth.hash_password(&password)?);
    }
    if let Some(role) = body.role {
        user.role = role;
    }
    if let Some(plan) = body.plan {
        user.plan = plan;
    }
    if let Some(is_active) = body.is_active {
        user.is_active = is_active;
        // Deactivation also kills the live reminder session.
        if !is_active {
            state.scheduler.stop(id);
        }
    }

    let user = state.users.save(user).await?;
    Ok(Json(to_user_response(&user)))
}

pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_oid(&user_id, "user_id")?;
    state.scheduler.stop(id);
    state.users.delete_cascade(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
