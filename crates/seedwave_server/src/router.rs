//! Router construction for the Seedwave server.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Catalog backed by the store
    let catalog = Router::new()
        .route(
            "/sectors",
            get(handlers::sectors::list_sectors).post(handlers::sectors::create_sector),
        )
        .route("/sectors/:id", get(handlers::sectors::get_sector))
        .route(
            "/brands",
            get(handlers::brands::list_brands).post(handlers::brands::create_brand),
        )
        .route("/brands/:id", get(handlers::brands::get_brand))
        .route(
            "/system-status",
            get(handlers::system_status::list_system_status),
        )
        .route(
            "/system-status/:service",
            get(handlers::system_status::get_system_status),
        )
        .route(
            "/legal-documents",
            get(handlers::legal::list_legal_documents)
                .post(handlers::legal::create_legal_document),
        )
        .route("/dashboard/stats", get(handlers::dashboard::stats));

    // Brand hierarchy fixture
    let global_sync = Router::new()
        .route("/brands", get(handlers::global_sync::brands))
        .route(
            "/cross-references",
            get(handlers::global_sync::cross_references),
        )
        .route("/metrics", get(handlers::global_sync::metrics))
        .route("/search", get(handlers::global_sync::search))
        .route(
            "/special-sections",
            get(handlers::global_sync::special_sections),
        )
        .route("/initialize", post(handlers::global_sync::initialize));

    // Solution fixture
    let external = Router::new()
        .route(
            "/solution-request",
            post(handlers::external::solution_request),
        )
        .route(
            "/housing-solutions",
            post(handlers::external::housing_solutions),
        )
        .route(
            "/brand-intelligence",
            get(handlers::external::brand_intelligence),
        )
        .route(
            "/solution-catalog",
            get(handlers::external::solution_catalog),
        )
        .route("/health", get(handlers::external::health))
        .route(
            "/batch-solutions",
            post(handlers::external::batch_solutions),
        )
        .route(
            "/development-status/:id",
            get(handlers::external::development_status),
        );

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", catalog)
        .nest("/api/global-sync", global_sync)
        .nest("/api/external", external)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
