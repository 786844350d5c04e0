//! External-portal solution endpoints.
//!
//! POST /api/external/solution-request
//! POST /api/external/housing-solutions
//! GET  /api/external/brand-intelligence?sector=&integration=
//! GET  /api/external/solution-catalog
//! GET  /api/external/health
//! POST /api/external/batch-solutions
//! GET  /api/external/development-status/:id

use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use seedwave_core::error::SeedwaveError;
use seedwave_core::service::optional_id;
use seedwave_core::solutions::{DevelopmentStatus, SolutionRequest, SolutionSummary, Urgency};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

pub async fn solution_request(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let raw = super::body(payload, "Invalid solution request")?;
    let request: SolutionRequest = serde_json::from_value(raw).map_err(|e| {
        tracing::debug!(error = %e, "solution request rejected");
        AppError::bad_request("Invalid solution request")
    })?;
    request.validate()?;

    let response = state.solutions.recommend(&request, &state.hierarchy);
    Ok(Json(json!({
        "success": true,
        "metadata": {
            "processingTime": Utc::now().timestamp_millis(),
            "brandCount": response.brand_recommendations.len(),
            "integrationTier": response.integration_tier,
        },
        "data": response,
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingRequest {
    pub location: Option<String>,
    pub budget: Option<f64>,
    pub housing_type: Option<String>,
    pub urgency: Option<Urgency>,
}

pub async fn housing_solutions(
    State(state): State<AppState>,
    payload: Result<Json<HousingRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let housing = super::body(payload, "Invalid housing request")?;
    let request = SolutionRequest::housing(
        housing.location,
        housing.budget,
        housing.housing_type,
        housing.urgency,
    );
    let response = state.solutions.recommend(&request, &state.hierarchy);
    Ok(Json(json!({
        "success": true,
        "housing": {
            "solutions": response.brand_recommendations,
            "overview": response.solution_overview,
            "development": response.development_pathway,
            "confidence": response.confidence_score,
        },
        "requestId": response.request_id,
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct IntelligenceQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub sector: Option<i64>,
    pub integration: Option<String>,
}

pub async fn brand_intelligence(
    State(state): State<AppState>,
    query: Result<Query<IntelligenceQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = super::query(query)?;
    let hierarchy = &state.hierarchy;
    let integration = query.integration.map(|i| i.to_lowercase());

    let brands: Vec<_> = hierarchy
        .all_nodes()
        .into_iter()
        .filter(|node| query.sector.is_none_or(|s| node.info().sector_id == s))
        .filter(|node| {
            integration.as_deref().is_none_or(|i| {
                node.info().integration.as_str().to_lowercase().contains(i)
            })
        })
        .collect();
    let metrics = hierarchy.metrics();

    Ok(Json(json!({
        "brands": brands,
        "specialSections": hierarchy.special_sections(),
        "metrics": {
            "totalBrands": metrics.total_brands,
            "integrity": metrics.integrity_score,
            "lastSync": metrics.last_sync,
        },
        "capabilities": {
            "housingDevelopment": true,
            "energyManagement": true,
            "smartAgriculture": true,
            "miningAnalytics": true,
            "entertainmentTech": true,
        },
    })))
}

pub async fn solution_catalog(State(state): State<AppState>) -> Json<serde_json::Value> {
    let catalog: BTreeMap<&str, Vec<SolutionSummary>> = state
        .solutions
        .entries()
        .map(|(key, entries)| (key, entries.iter().map(|e| e.summary()).collect()))
        .collect();
    Json(json!({
        "catalog": catalog,
        "categories": state.solutions.categories(),
        "totalSolutions": state.solutions.total_solutions(),
        "lastUpdated": Utc::now(),
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let metrics = state.hierarchy.metrics();
    Json(json!({
        "status": "operational",
        "backend": {
            "version": env!("CARGO_PKG_VERSION"),
            "type": "brand-intelligence-engine",
            "capabilities": ["solution-processing", "brand-intelligence", "development-pathways"],
        },
        "sync": {
            "integrity": metrics.integrity_score,
            "lastSync": metrics.last_sync,
            "totalBrands": metrics.total_brands,
        },
        "integrations": {
            "tshwaneAI": "ready",
            "govPortals": "ready",
            "externalAPIs": "ready",
        },
        "timestamp": Utc::now(),
    }))
}

pub async fn batch_solutions(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let raw = super::body(payload, "Requests must be an array")?;
    let requests = match raw.get("requests") {
        Some(serde_json::Value::Array(items)) => items.clone(),
        _ => {
            return Err(SeedwaveError::InvalidInput("Requests must be an array".into()).into())
        }
    };
    tracing::info!(count = requests.len(), "processing solution batch");

    let responses = state.solutions.process_batch(requests, &state.hierarchy);
    let now = Utc::now();
    Ok(Json(json!({
        "success": true,
        "processed": responses.len(),
        "responses": responses,
        "batchId": format!("batch-{}", now.timestamp_millis()),
        "timestamp": now,
    })))
}

pub async fn development_status(Path(request_id): Path<String>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "status": DevelopmentStatus::for_request(request_id, Utc::now()),
    }))
}
