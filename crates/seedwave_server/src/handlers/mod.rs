//! Route handlers, one module per resource.

pub mod brands;
pub mod dashboard;
pub mod external;
pub mod global_sync;
pub mod health;
pub mod legal;
pub mod sectors;
pub mod system_status;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body, logging the rejection and answering with `message`.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, AppError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "request body rejected");
        AppError::bad_request(message)
    })
}

pub(crate) fn path<T>(path: Result<Path<T>, PathRejection>, message: &str) -> Result<T, AppError> {
    path.map(|Path(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "path rejected");
        AppError::bad_request(message)
    })
}

pub(crate) fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}
