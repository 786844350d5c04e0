//! GET /api/system-status
//! GET /api/system-status/:service

use axum::extract::{Path, State};
use axum::Json;
use seedwave_core::types::SystemStatus;

use crate::error::AppError;
use crate::state::AppState;

pub async fn list_system_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<SystemStatus>>, AppError> {
    Ok(Json(state.catalog.list_system_status().await?))
}

pub async fn get_system_status(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Result<Json<SystemStatus>, AppError> {
    Ok(Json(state.catalog.get_system_status(&service).await?))
}
