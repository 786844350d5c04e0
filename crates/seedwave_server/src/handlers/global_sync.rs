//! Brand hierarchy fixture endpoints.
//!
//! GET  /api/global-sync/brands             — section, sector, hierarchy or flat listing
//! GET  /api/global-sync/cross-references   — optional `type` filter
//! GET  /api/global-sync/metrics            — metrics stamped now
//! GET  /api/global-sync/search             — `q` required, `section` / `integration` filters
//! GET  /api/global-sync/special-sections   — per-section stats
//! POST /api/global-sync/initialize         — rebuild a snapshot, return its metrics

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use seedwave_core::hierarchy::{BrandHierarchy, SpecialSection};
use seedwave_core::service::optional_id;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandsQuery {
    pub special_section: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub sector_id: Option<i64>,
    pub include_hierarchy: Option<String>,
}

pub async fn brands(
    State(state): State<AppState>,
    query: Result<Query<BrandsQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = super::query(query)?;
    let hierarchy = &state.hierarchy;

    // Only the crate-dance section has a dedicated listing.
    let section = query.special_section.as_deref().and_then(SpecialSection::parse);
    if section == Some(SpecialSection::FruitfulCrateDance) {
        let brands = hierarchy.special_section(SpecialSection::FruitfulCrateDance);
        return Ok(Json(json!({
            "section": SpecialSection::FruitfulCrateDance,
            "brands": brands,
            "count": brands.len(),
        })));
    }

    if let Some(sector_id) = query.sector_id {
        let brands = hierarchy.brands_in_sector(sector_id);
        return Ok(Json(json!({
            "sectorId": sector_id,
            "brands": brands,
            "count": brands.len(),
        })));
    }

    if query.include_hierarchy.as_deref() == Some("true") {
        let core: Vec<_> = hierarchy.core_brands().collect();
        let subnodes: Vec<_> = hierarchy.subnodes().collect();
        return Ok(Json(json!({
            "coreBrands": core,
            "subnodes": subnodes,
            "specialSections": hierarchy.special_sections(),
            "counts": {
                "total": core.len() + subnodes.len(),
                "core": core.len(),
                "subnodes": subnodes.len(),
            },
        })));
    }

    let all = hierarchy.all_nodes();
    Ok(Json(json!({
        "total": all.len(),
        "brands": all,
        "metrics": hierarchy.metrics(),
    })))
}

#[derive(Debug, Default, Deserialize)]
pub struct CrossReferenceQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub async fn cross_references(
    State(state): State<AppState>,
    Query(query): Query<CrossReferenceQuery>,
) -> Json<serde_json::Value> {
    let refs = state.hierarchy.cross_references(query.kind.as_deref());
    let mut types: Vec<&str> = Vec::new();
    for r in &refs {
        if !types.contains(&r.kind()) {
            types.push(r.kind());
        }
    }
    Json(json!({
        "count": refs.len(),
        "crossReferences": refs,
        "types": types,
    }))
}

pub async fn metrics(State(state): State<AppState>) -> Json<serde_json::Value> {
    let now = Utc::now();
    let metrics = state.hierarchy.metrics_at(now);
    Json(json!({
        "timestamp": now,
        "status": "synchronized",
        "performance": {
            "lastSync": metrics.last_sync,
            "integrityScore": metrics.integrity_score,
            "crossReferences": metrics.cross_references,
        },
        "metrics": metrics,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub section: Option<String>,
    pub integration: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let q = query
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::bad_request("Search query required"))?;

    let results: Vec<_> = state
        .hierarchy
        .search(q)
        .into_iter()
        .filter(|node| {
            let info = node.info();
            query
                .section
                .as_deref()
                .is_none_or(|s| info.special_section.map(|sec| sec.as_str()) == Some(s))
                && query
                    .integration
                    .as_deref()
                    .is_none_or(|i| info.integration.as_str() == i)
        })
        .collect();

    Ok(Json(json!({
        "query": q,
        "count": results.len(),
        "results": results,
        "filters": {
            "section": query.section,
            "integration": query.integration,
        },
    })))
}

pub async fn special_sections(State(state): State<AppState>) -> Json<serde_json::Value> {
    let hierarchy = &state.hierarchy;
    let summary: serde_json::Map<String, serde_json::Value> = SpecialSection::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), json!(hierarchy.special_section(*s).len())))
        .collect();
    Json(json!({
        "sections": hierarchy.section_stats(),
        "totalSections": hierarchy.special_sections().len(),
        "summary": summary,
    }))
}

/// Builds a fresh snapshot from the literals. The shared fixture in the
/// router state is left as is; both are identical apart from timestamps.
pub async fn initialize() -> Json<serde_json::Value> {
    tracing::info!("rebuilding brand hierarchy snapshot");
    let fresh = BrandHierarchy::build();
    Json(json!({
        "success": true,
        "message": "Global brand synchronization initialized successfully",
        "metrics": fresh.metrics(),
        "timestamp": Utc::now(),
    }))
}
