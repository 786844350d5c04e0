//! HTTP-level contract tests for the Seedwave REST surface.
//!
//! Drives the router with `oneshot` against a seeded `InMemoryCatalogStore`;
//! no database or network needed.

use std::sync::Arc;

use axum::body::Body;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use seedwave_core::memory::InMemoryCatalogStore;
use seedwave_core::seeds::{SeedBundle, SeedOptions, Seeder};
use seedwave_server::router::build_router;
use seedwave_server::state::AppState;
use serde_json::{json, Value};
use tower::ServiceExt;

// ── Test app builder ───────────────────────────────────────────

async fn seeded_app() -> axum::Router {
    let store = InMemoryCatalogStore::new();
    Seeder::new(&store)
        .run(&SeedBundle::standard(), SeedOptions::default())
        .await
        .expect("seed failed");
    build_router(AppState::new(Arc::new(store)))
}

fn empty_app() -> axum::Router {
    build_router(AppState::new(Arc::new(InMemoryCatalogStore::new())))
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

// ── Catalog ────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(&empty_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_sector_then_brand_scenario() {
    let app = empty_app();

    let (status, sector) = post(
        &app,
        "/api/sectors",
        json!({"name": "Test Sector", "emoji": "🧪", "description": "scenario", "price": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let sector_id = sector["id"].as_i64().unwrap();
    assert_eq!(sector["brandCount"], 0);
    assert_eq!(sector["price"], "10");

    let (_, sectors) = get(&app, "/api/sectors").await;
    let listed = sectors
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Test Sector")
        .expect("sector listed");
    assert_eq!(listed["brandCount"], 0);

    let (status, brand) = post(
        &app,
        "/api/brands",
        json!({
            "name": "TestBrand™",
            "sectorId": sector_id,
            "integration": "VaultMesh™",
            "status": "active",
            "isCore": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(brand["isCore"], true);
    assert!(brand["parentId"].is_null());

    let (status, brands) = get(&app, &format!("/api/brands?sectorId={sector_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&brands), vec![brand["id"].as_i64().unwrap()]);
    assert_eq!(brands[0], brand);
}

#[tokio::test]
async fn legacy_active_integration_is_accepted() {
    let app = empty_app();
    let (_, sector) = post(&app, "/api/sectors", json!({"name": "Legacy Sector"})).await;
    let (status, brand) = post(
        &app,
        "/api/brands",
        json!({
            "name": "OldSeed",
            "sectorId": sector["id"],
            "integration": "active",
            "status": "active"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(brand["integration"], "active");

    let (status, brands) = get(&app, "/api/brands").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(brands[0]["integration"], "active");
}

#[tokio::test]
async fn duplicate_sector_is_conflict() {
    let app = empty_app();
    let body = json!({"name": "Test Sector"});
    post(&app, "/api/sectors", body.clone()).await;
    let (status, err) = post(&app, "/api/sectors", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["message"].is_string());
}

#[tokio::test]
async fn missing_sector_is_404_with_message() {
    let (status, body) = get(&seeded_app().await, "/api/sectors/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Sector not found");
}

#[tokio::test]
async fn non_numeric_ids_are_400() {
    let app = seeded_app().await;
    let (status, body) = get(&app, "/api/sectors/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, _) = get(&app, "/api/brands?sectorId=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn brands_by_sector_only_returns_that_sector() {
    let app = seeded_app().await;
    let (_, sectors) = get(&app, "/api/sectors").await;
    for sector in sectors.as_array().unwrap() {
        let id = sector["id"].as_i64().unwrap();
        let (status, brands) = get(&app, &format!("/api/brands?sectorId={id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(brands
            .as_array()
            .unwrap()
            .iter()
            .all(|b| b["sectorId"].as_i64() == Some(id)));
    }

    let (_, none) = get(&app, "/api/brands?sectorId=999999").await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn every_parent_is_core_and_in_same_sector() {
    let app = seeded_app().await;
    let (_, brands) = get(&app, "/api/brands").await;
    let brands = brands.as_array().unwrap();
    let children: Vec<_> = brands.iter().filter(|b| !b["parentId"].is_null()).collect();
    assert!(!children.is_empty());
    for child in children {
        let parent = brands
            .iter()
            .find(|b| b["id"] == child["parentId"])
            .expect("parent exists");
        assert_eq!(parent["isCore"], true);
        assert_eq!(parent["sectorId"], child["sectorId"]);
    }
}

#[tokio::test]
async fn search_is_case_insensitive_and_wins_over_sector() {
    let app = seeded_app().await;
    let (_, hits) = get(&app, "/api/brands?search=FINANCEFLOW").await;
    let names: Vec<_> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["FinanceFlow"]);

    let (_, hits) = get(&app, "/api/brands?search=financeflow&sectorId=999999").await;
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let (status, none) = get(&app, "/api/brands?search=zzzz-no-match").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn get_brand_by_id() {
    let app = seeded_app().await;
    let (_, brands) = get(&app, "/api/brands").await;
    let first = &brands[0];
    let (status, brand) = get(&app, &format!("/api/brands/{}", first["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&brand, first);

    let (status, body) = get(&app, "/api/brands/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Brand not found");
}

#[tokio::test]
async fn create_brand_without_name_is_400() {
    let app = seeded_app().await;
    let (_, sectors) = get(&app, "/api/sectors").await;
    let sector_id = sectors[0]["id"].as_i64().unwrap();
    let (status, body) = post(
        &app,
        "/api/brands",
        json!({"sectorId": sector_id, "integration": "HotStack", "status": "active"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid brand data");
}

#[tokio::test]
async fn create_brand_in_unknown_sector_is_400() {
    let (status, body) = post(
        &seeded_app().await,
        "/api/brands",
        json!({"name": "Nowhere", "sectorId": 999999, "integration": "HotStack", "status": "active"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid brand data");
}

#[tokio::test]
async fn duplicate_brand_is_generic_400() {
    let app = empty_app();
    let (_, sector) = post(&app, "/api/sectors", json!({"name": "Dup Sector"})).await;
    let body = json!({
        "name": "Dup",
        "sectorId": sector["id"],
        "integration": "HotStack",
        "status": "active"
    });
    let (status, _) = post(&app, "/api/brands", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = post(&app, "/api/brands", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "Invalid brand data");
}

#[tokio::test]
async fn subnode_creation_bumps_subnode_count() {
    let app = seeded_app().await;
    let (_, brands) = get(&app, "/api/brands?search=FinanceFlow").await;
    let parent = &brands[0];
    let sector_id = parent["sectorId"].as_i64().unwrap();
    let (_, before) = get(&app, &format!("/api/sectors/{sector_id}")).await;

    let (status, sub) = post(
        &app,
        "/api/brands",
        json!({
            "name": "FinSub-Gamma",
            "sectorId": sector_id,
            "parentId": parent["id"],
            "integration": "FAA.ZONE™",
            "status": "pending"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sub["isCore"], false);

    let (_, after) = get(&app, &format!("/api/sectors/{sector_id}")).await;
    assert_eq!(
        after["subnodeCount"].as_i64().unwrap(),
        before["subnodeCount"].as_i64().unwrap() + 1
    );
    assert_eq!(after["brandCount"], before["brandCount"]);
}

#[tokio::test]
async fn dashboard_stats_partition_brands() {
    let app = seeded_app().await;
    let (status, stats) = get(&app, "/api/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK);
    let (_, brands) = get(&app, "/api/brands").await;
    let (_, sectors) = get(&app, "/api/sectors").await;

    let total = stats["totalElements"].as_u64().unwrap();
    assert_eq!(total as usize, brands.as_array().unwrap().len());
    assert_eq!(
        stats["coreBrands"].as_u64().unwrap() + stats["subnodes"].as_u64().unwrap(),
        total
    );
    assert_eq!(
        stats["sectors"].as_u64().unwrap() as usize,
        sectors.as_array().unwrap().len()
    );
}

#[tokio::test]
async fn system_status_lookup() {
    let app = seeded_app().await;
    let (_, all) = get(&app, "/api/system-status").await;
    assert_eq!(all.as_array().unwrap().len(), 5);

    let (status, hot) = get(&app, "/api/system-status/HotStack").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hot["status"], "maintenance");

    let (status, body) = get(&app, "/api/system-status/Nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Service not found");
}

#[tokio::test]
async fn legal_documents_list_and_create() {
    let app = seeded_app().await;
    let (_, docs) = get(&app, "/api/legal-documents").await;
    assert_eq!(docs.as_array().unwrap().len(), 8);

    let (status, created) = post(
        &app,
        "/api/legal-documents",
        json!({
            "title": "Partner MoU",
            "url": "/legal-docs/partner-mou",
            "category": "contracts",
            "tags": ["mou"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["category"], "contracts");

    let (status, _) = post(
        &app,
        "/api/legal-documents",
        json!({"title": "No url", "category": "contracts"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Brand hierarchy fixture ────────────────────────────────────

#[tokio::test]
async fn global_sync_listings() {
    let app = empty_app();

    let (_, flat) = get(&app, "/api/global-sync/brands").await;
    assert_eq!(flat["total"], 12);
    assert_eq!(flat["metrics"]["integrityScore"], 100);

    let (_, tree) = get(&app, "/api/global-sync/brands?includeHierarchy=true").await;
    assert_eq!(tree["counts"], json!({"total": 12, "core": 7, "subnodes": 5}));

    let (_, section) = get(
        &app,
        "/api/global-sync/brands?specialSection=fruitful-crate-dance",
    )
    .await;
    assert_eq!(section["section"], "fruitful-crate-dance");
    assert_eq!(section["count"], 4);

    let (_, sector) = get(&app, "/api/global-sync/brands?sectorId=1").await;
    assert_eq!(sector["sectorId"], 1);
    assert!(sector["count"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn global_sync_search_requires_query() {
    let app = empty_app();
    let (status, body) = get(&app, "/api/global-sync/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query required");

    let (status, _) = get(&app, "/api/global-sync/search?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/global-sync/search?q=AGRI").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn cross_references_filter_by_type() {
    let app = empty_app();
    let (_, all) = get(&app, "/api/global-sync/cross-references").await;
    assert_eq!(all["count"], 10);

    let (_, bridges) = get(&app, "/api/global-sync/cross-references?type=sector-bridge").await;
    assert_eq!(bridges["types"], json!(["sector-bridge"]));
    assert!(bridges["crossReferences"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["type"] == "sector-bridge"));
}

#[tokio::test]
async fn fixture_is_deterministic_across_initialize() {
    let app = empty_app();
    let strip = |mut m: Value| {
        m.as_object_mut().unwrap().remove("lastSync");
        m
    };

    let (status, first) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/global-sync/initialize")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, m1) = get(&app, "/api/global-sync/metrics").await;

    let (_, second) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/global-sync/initialize")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let (_, m2) = get(&app, "/api/global-sync/metrics").await;

    assert_eq!(strip(first["metrics"].clone()), strip(second["metrics"].clone()));
    assert_eq!(strip(m1["metrics"].clone()), strip(m2["metrics"].clone()));
    assert_eq!(m1["status"], "synchronized");
}

#[tokio::test]
async fn special_sections_summary() {
    let (_, body) = get(&empty_app(), "/api/global-sync/special-sections").await;
    assert_eq!(body["totalSections"], 2);
    assert_eq!(
        body["summary"],
        json!({"fruitful-crate-dance": 4, "fruitful-smart-toys": 1})
    );
}

// ── Solution fixture ───────────────────────────────────────────

#[tokio::test]
async fn solution_request_requires_category_and_portal() {
    let app = empty_app();
    let (status, body) = post(
        &app,
        "/api/external/solution-request",
        json!({"category": "housing"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("category and portalSource"));
}

#[tokio::test]
async fn solution_request_ranks_brands() {
    let (status, body) = post(
        &empty_app(),
        "/api/external/solution-request",
        json!({"category": "housing", "portalSource": "tshwane-ai", "urgency": "high"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let recs = body["data"]["brandRecommendations"].as_array().unwrap();
    assert_eq!(body["metadata"]["brandCount"].as_u64().unwrap() as usize, recs.len());
    let scores: Vec<f64> = recs
        .iter()
        .map(|r| r["relevanceScore"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| *s <= 1.0));
    assert_eq!(body["data"]["developmentPathway"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn housing_solutions_wraps_response() {
    let (status, body) = post(
        &empty_app(),
        "/api/external/housing-solutions",
        json!({"location": "Tshwane", "housingType": "low-cost"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["requestId"].is_string());
    assert!(body["housing"]["confidence"].as_f64().unwrap() <= 1.0);
}

#[tokio::test]
async fn batch_solutions_requires_array() {
    let app = empty_app();
    let (status, body) = post(&app, "/api/external/batch-solutions", json!({"requests": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Requests must be an array");

    let (status, body) = post(
        &app,
        "/api/external/batch-solutions",
        json!({"requests": [
            {"category": "mining", "portalSource": "gov-portal"},
            {"category": "energy"}
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 2);
    assert!(body["responses"][0]["requestId"].is_string());
    assert!(body["responses"][1]["requestId"].is_string());
    assert!(body["responses"][1].get("error").is_none());

    let (status, body) = post(
        &app,
        "/api/external/batch-solutions",
        json!({"requests": [{"portalSource": "gov-portal"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["responses"][0]["error"],
        "Failed to process request for undefined"
    );
    assert_eq!(body["responses"][0]["originalRequest"]["portalSource"], "gov-portal");
}

#[tokio::test]
async fn catalog_intelligence_and_status() {
    let app = empty_app();

    let (_, catalog) = get(&app, "/api/external/solution-catalog").await;
    assert_eq!(
        catalog["categories"],
        json!(["housing", "energy", "agriculture", "mining", "entertainment"])
    );
    assert_eq!(catalog["totalSolutions"], 6);

    let (_, intel) = get(&app, "/api/external/brand-intelligence?integration=vaultmesh").await;
    assert!(intel["brands"]
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["integration"] == "VaultMesh™"));

    let (_, health) = get(&app, "/api/external/health").await;
    assert_eq!(health["status"], "operational");

    let (_, status) = get(&app, "/api/external/development-status/req-42").await;
    assert_eq!(status["status"]["requestId"], "req-42");
    assert_eq!(status["status"]["progress"], 35);
}
