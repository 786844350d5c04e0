//! GET  /api/brands?search=&sectorId=
//! GET  /api/brands/:id
//! POST /api/brands

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use seedwave_core::error::SeedwaveError;
use seedwave_core::service::BrandQuery;
use seedwave_core::types::{Brand, NewBrand};

use crate::error::AppError;
use crate::state::AppState;

const INVALID_BRAND: &str = "Invalid brand data";

pub async fn list_brands(
    State(state): State<AppState>,
    query: Result<Query<BrandQuery>, QueryRejection>,
) -> Result<Json<Vec<Brand>>, AppError> {
    let query = super::query(query)?;
    Ok(Json(state.catalog.list_brands(&query).await?))
}

pub async fn get_brand(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Brand>, AppError> {
    let id = super::path(id, "Invalid brand id")?;
    Ok(Json(state.catalog.get_brand(id).await?))
}

/// Validation failures all answer with the same generic message; the
/// detail only goes to the log.
pub async fn create_brand(
    State(state): State<AppState>,
    payload: Result<Json<NewBrand>, JsonRejection>,
) -> Result<(StatusCode, Json<Brand>), AppError> {
    let brand = super::body(payload, INVALID_BRAND)?;
    match state.catalog.create_brand(brand).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(SeedwaveError::InvalidInput(detail) | SeedwaveError::Conflict(detail)) => {
            tracing::info!(%detail, "brand rejected");
            Err(AppError::bad_request(INVALID_BRAND))
        }
        Err(e) => Err(e.into()),
    }
}
