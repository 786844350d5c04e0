//! Storage port for the catalog.
//!
//! The catalog service, the HTTP layer and the seeder all go through
//! `CatalogStore`, so the same logic runs against Postgres
//! (`seedwave_postgres::PgCatalogStore`) or `InMemoryCatalogStore`.

use async_trait::async_trait;

use crate::error::SeedwaveError;
use crate::types::*;

pub type Result<T> = std::result::Result<T, SeedwaveError>;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ── Sectors ──

    /// All sectors in insertion order.
    async fn list_sectors(&self) -> Result<Vec<Sector>>;
    async fn get_sector(&self, id: i64) -> Result<Option<Sector>>;
    async fn find_sector_by_name(&self, name: &str) -> Result<Option<Sector>>;
    /// Insert a sector with zeroed counts. A duplicate name is `Conflict`.
    async fn create_sector(&self, sector: &NewSector) -> Result<Sector>;
    /// Recompute `brand_count` / `subnode_count` from the brand rows.
    async fn recount_sector(&self, id: i64) -> Result<Sector>;

    // ── Brands ──

    async fn list_brands(&self) -> Result<Vec<Brand>>;
    async fn get_brand(&self, id: i64) -> Result<Option<Brand>>;
    /// Unknown sector ids yield an empty list, not an error.
    async fn brands_by_sector(&self, sector_id: i64) -> Result<Vec<Brand>>;
    /// Case-insensitive substring match on the brand name.
    async fn search_brands(&self, term: &str) -> Result<Vec<Brand>>;
    /// Insert a brand and bump its sector's counts.
    ///
    /// Fails with `InvalidInput` when the sector does not exist or a
    /// subnode's parent is missing, not core, or in another sector.
    async fn create_brand(&self, brand: &ValidatedBrand) -> Result<Brand>;

    // ── System status ──

    async fn list_system_status(&self) -> Result<Vec<SystemStatus>>;
    async fn get_system_status(&self, service: &str) -> Result<Option<SystemStatus>>;
    async fn upsert_system_status(&self, service: &str, status: ServiceState)
        -> Result<SystemStatus>;

    // ── Legal documents ──

    async fn list_legal_documents(&self) -> Result<Vec<LegalDocument>>;
    async fn create_legal_document(&self, doc: &NewLegalDocument) -> Result<LegalDocument>;
}

/// Placement rules every store enforces before inserting a subnode.
/// `parent` is the row found for the subnode's `parent_id`, if any.
pub fn check_subnode_parent(
    brand: &ValidatedBrand,
    parent: Option<&Brand>,
) -> Result<()> {
    let BrandPlacement::Subnode { parent_id } = brand.placement else {
        return Ok(());
    };
    let parent = parent.ok_or_else(|| {
        SeedwaveError::InvalidInput(format!("parent brand {parent_id} does not exist"))
    })?;
    if !parent.is_core || parent.parent_id.is_some() {
        return Err(SeedwaveError::InvalidInput(format!(
            "parent brand {parent_id} is not a core brand"
        )));
    }
    if parent.sector_id != brand.sector_id {
        return Err(SeedwaveError::InvalidInput(format!(
            "parent brand {parent_id} belongs to sector {}, not {}",
            parent.sector_id, brand.sector_id
        )));
    }
    Ok(())
}
