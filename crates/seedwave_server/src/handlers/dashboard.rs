//! GET /api/dashboard/stats

use axum::extract::State;
use axum::Json;
use seedwave_core::types::DashboardStats;

use crate::error::AppError;
use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.catalog.dashboard_stats().await?))
}
