//! GET  /api/legal-documents
//! POST /api/legal-documents

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use seedwave_core::types::{LegalDocument, NewLegalDocument};

use crate::error::AppError;
use crate::state::AppState;

pub async fn list_legal_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<LegalDocument>>, AppError> {
    Ok(Json(state.catalog.list_legal_documents().await?))
}

pub async fn create_legal_document(
    State(state): State<AppState>,
    payload: Result<Json<NewLegalDocument>, JsonRejection>,
) -> Result<(StatusCode, Json<LegalDocument>), AppError> {
    let doc = super::body(payload, "Invalid legal document data")?;
    let created = state.catalog.create_legal_document(doc).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
