use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use fluxo_db::models::{PlanType, User, UserRole};
use fluxo_services::auth::AuthError;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub plan: PlanType,
    pub is_active: bool,
    pub avatar: Option<String>,
}

pub(crate) fn to_user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        plan: user.plan,
        is_active: user.is_active,
        avatar: user.avatar.clone(),
    }
}

fn session_cookie(token: &str, max_age: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let cookie = format!(
        "access_token={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}",
    );
    if let Ok(value) = cookie.parse() {
        headers.insert(header::SET_COOKIE, value);
    }
    headers
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let password_hash = state.auth.hash_password(&body.password)?;

    // New accounts always start on the entry tier.
    let user = state
        .users
        .create(
            body.name,
            body.email.to_lowercase(),
            password_hash,
            UserRole::User,
            PlanType::Basic,
        )
        .await?;

    let user_id = user.id.ok_or_else(|| ApiError::Internal("Missing user id".to_string()))?;
    let tokens = state
        .auth
        .generate_tokens(user_id, &user.email, &user.name, user.role)?;

    state.scheduler.start(user_id);

    let headers = session_cookie(&tokens.access_token, tokens.expires_in);
    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: to_user_response(&user),
    };

    Ok((StatusCode::CREATED, headers, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    let user = state
        .users
        .find_by_email(&body.email.to_lowercase())
        .await
        .map_err(|_| AuthError::InvalidCredentials)?;

    // A missing hash is indistinguishable from a wrong password.
    let password_hash = user
        .password_hash
        .as_ref()
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = state.auth.verify_password(&body.password, password_hash)?;
    if !valid {
        return Err(AuthError::InvalidCredentials.into());
    }

    if !user.is_active {
        return Err(AuthError::AccountDisabled.into());
    }

    let user_id = user.id.ok_or_else(|| ApiError::Internal("Missing user id".to_string()))?;
    let tokens = state
        .auth
        .generate_tokens(user_id, &user.email, &user.name, user.role)?;

    // One reminder timer per active session.
    state.scheduler.start(user_id);

    let headers = session_cookie(&tokens.access_token, tokens.expires_in);
    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: to_user_response(&user),
    };

    Ok((headers, Json(response)))
}

pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<HeaderMap, ApiError> {
    state.scheduler.stop(auth.user_id);
    Ok(session_cookie("", 0))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.base.find_by_id(auth.user_id).await?;
    Ok(Json(to_user_response(&user)))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    let claims = state.auth.verify_refresh_token(&body.refresh_token)?;

    let user_id = bson::oid::ObjectId::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid user ID".to_string()))?;

    let user = state.users.base.find_by_id(user_id).await?;
    if !user.is_active {
        return Err(AuthError::AccountDisabled.into());
    }

    let tokens = state
        .auth
        .generate_tokens(user_id, &user.email, &user.name, user.role)?;

    let headers = session_cookie(&tokens.access_token, tokens.expires_in);
    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: to_user_response(&user),
    };

    Ok((headers, Json(response)))
}
