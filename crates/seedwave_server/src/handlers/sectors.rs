//! GET  /api/sectors
//! POST /api/sectors
//! GET  /api/sectors/:id

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use seedwave_core::types::{NewSector, Sector};

use crate::error::AppError;
use crate::state::AppState;

pub async fn list_sectors(State(state): State<AppState>) -> Result<Json<Vec<Sector>>, AppError> {
    Ok(Json(state.catalog.list_sectors().await?))
}

pub async fn get_sector(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Sector>, AppError> {
    let id = super::path(id, "Invalid sector id")?;
    Ok(Json(state.catalog.get_sector(id).await?))
}

pub async fn create_sector(
    State(state): State<AppState>,
    payload: Result<Json<NewSector>, JsonRejection>,
) -> Result<(StatusCode, Json<Sector>), AppError> {
    let sector = super::body(payload, "Invalid sector data")?;
    let created = state.catalog.create_sector(sector).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
