//! Shared router state.

use std::sync::Arc;

use seedwave_core::hierarchy::BrandHierarchy;
use seedwave_core::ports::CatalogStore;
use seedwave_core::solutions::SolutionCatalog;
use seedwave_core::CatalogService;

/// Cloned into every handler. The fixtures are built once and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub hierarchy: Arc<BrandHierarchy>,
    pub solutions: Arc<SolutionCatalog>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: CatalogService::new(store),
            hierarchy: Arc::new(BrandHierarchy::build()),
            solutions: Arc::new(SolutionCatalog::build()),
        }
    }
}
