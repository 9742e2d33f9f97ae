use axum::{Json, extract::State};
use fluxo_services::export::{DatabaseExport, ImportSummary};

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

pub async fn export_all(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<DatabaseExport>, ApiError> {
    let export = state.export.export_all().await?;
    Ok(Json(export))
}

pub async fn import(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<DatabaseExport>,
) -> Result<Json<ImportSummary>, ApiError> {
    let summary = state.export.import(body).await?;
    Ok(Json(summary))
}
