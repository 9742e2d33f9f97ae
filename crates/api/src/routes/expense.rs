use axum::{
    Json,
    extract::{Path, State},
};
use bson::DateTime;
use fluxo_db::models::{Expense, ExpenseKind};
use fluxo_services::access::Feature;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

use super::{parse_oid, require_feature};

#[derive(Debug, Deserialize)]
pub struct SaveExpenseRequest {
    pub id: Option<String>,
    pub description: String,
    pub amount: f64,
    #[serde(default = "default_category")]
    pub category: String,
    /// Epoch milliseconds; defaults to now when omitted.
    pub date: Option<i64>,
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
}

fn default_category() -> String {
    "Geral".to_string()
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: i64,
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
}

fn to_response(e: Expense) -> ExpenseResponse {
    ExpenseResponse {
        id: e.id.map(|id| id.to_hex()).unwrap_or_default(),
        description: e.description,
        amount: e.amount,
        category: e.category,
        date: e.date.timestamp_millis(),
        kind: e.kind,
    }
}

pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    require_feature(&state, auth.user_id, Feature::Expenses).await?;
    let expenses = state.expenses.list(auth.user_id).await?;
    Ok(Json(expenses.into_iter().map(to_response).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<String>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    require_feature(&state, auth.user_id, Feature::Expenses).await?;
    let id = parse_oid(&expense_id, "expense_id")?;
    let expense = state.expenses.get(auth.user_id, id).await?;
    Ok(Json(to_response(expense)))
}

pub async fn save(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SaveExpenseRequest>,
) -> Result<Json<ExpenseResponse>, ApiError> {
    require_feature(&state, auth.user_id, Feature::Expenses).await?;
    let id = body.id.as_deref().map(|s| parse_oid(s, "id")).transpose()?;
    if let Some(id) = id {
        state.expenses.get(auth.user_id, id).await?;
    }

    let expense = state
        .expenses
        .save(Expense {
            id,
            user_id: auth.user_id,
            description: body.description,
            amount: body.amount,
            category: body.category,
            date: body.date.map(DateTime::from_millis).unwrap_or_else(DateTime::now),
            kind: body.kind,
        })
        .await?;

    Ok(Json(to_response(expense)))
}

pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(expense_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_feature(&state, auth.user_id, Feature::Expenses).await?;
    let id = parse_oid(&expense_id, "expense_id")?;
    state.expenses.delete(auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
