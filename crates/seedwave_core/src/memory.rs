//! In-memory `CatalogStore` used by tests and the `--in-memory` server mode.
//!
//! Mirrors the Postgres constraints that matter to callers: unique sector
//! names, unique brand names per sector, unique service names.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::SeedwaveError;
use crate::ports::{check_subnode_parent, CatalogStore, Result};
use crate::types::*;

#[derive(Default)]
struct Tables {
    sectors: Vec<Sector>,
    brands: Vec<Brand>,
    statuses: Vec<SystemStatus>,
    legal: Vec<LegalDocument>,
    next_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn sector_mut(&mut self, id: i64) -> Option<&mut Sector> {
        self.sectors.iter_mut().find(|s| s.id == id)
    }
}

#[derive(Default)]
pub struct InMemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_sectors(&self) -> Result<Vec<Sector>> {
        Ok(self.tables.read().await.sectors.clone())
    }

    async fn get_sector(&self, id: i64) -> Result<Option<Sector>> {
        let tables = self.tables.read().await;
        Ok(tables.sectors.iter().find(|s| s.id == id).cloned())
    }

    async fn find_sector_by_name(&self, name: &str) -> Result<Option<Sector>> {
        let tables = self.tables.read().await;
        Ok(tables.sectors.iter().find(|s| s.name == name).cloned())
    }

    async fn create_sector(&self, sector: &NewSector) -> Result<Sector> {
        let mut tables = self.tables.write().await;
        if tables.sectors.iter().any(|s| s.name == sector.name) {
            return Err(SeedwaveError::Conflict(format!(
                "sector '{}' already exists",
                sector.name
            )));
        }
        let row = Sector {
            id: tables.allocate_id(),
            name: sector.name.clone(),
            emoji: sector.emoji.clone(),
            description: sector.description.clone(),
            price: sector.price,
            status: sector.status,
            is_core: sector.is_core,
            brand_count: 0,
            subnode_count: 0,
            metadata: sector.metadata.clone(),
        };
        tables.sectors.push(row.clone());
        Ok(row)
    }

    async fn recount_sector(&self, id: i64) -> Result<Sector> {
        let mut tables = self.tables.write().await;
        let (core, sub) = tables
            .brands
            .iter()
            .filter(|b| b.sector_id == id)
            .fold((0, 0), |(core, sub), b| {
                if b.is_core {
                    (core + 1, sub)
                } else {
                    (core, sub + 1)
                }
            });
        let sector = tables
            .sector_mut(id)
            .ok_or_else(|| SeedwaveError::NotFound(format!("sector {id}")))?;
        sector.brand_count = core;
        sector.subnode_count = sub;
        Ok(sector.clone())
    }

    async fn list_brands(&self) -> Result<Vec<Brand>> {
        Ok(self.tables.read().await.brands.clone())
    }

    async fn get_brand(&self, id: i64) -> Result<Option<Brand>> {
        let tables = self.tables.read().await;
        Ok(tables.brands.iter().find(|b| b.id == id).cloned())
    }

    async fn brands_by_sector(&self, sector_id: i64) -> Result<Vec<Brand>> {
        let tables = self.tables.read().await;
        Ok(tables
            .brands
            .iter()
            .filter(|b| b.sector_id == sector_id)
            .cloned()
            .collect())
    }

    async fn search_brands(&self, term: &str) -> Result<Vec<Brand>> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .brands
            .iter()
            .filter(|b| b.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create_brand(&self, brand: &ValidatedBrand) -> Result<Brand> {
        let mut tables = self.tables.write().await;

        if !tables.sectors.iter().any(|s| s.id == brand.sector_id) {
            return Err(SeedwaveError::InvalidInput(format!(
                "sector {} does not exist",
                brand.sector_id
            )));
        }
        let parent = brand
            .placement
            .parent_id()
            .and_then(|pid| tables.brands.iter().find(|b| b.id == pid));
        check_subnode_parent(brand, parent)?;
        if tables
            .brands
            .iter()
            .any(|b| b.sector_id == brand.sector_id && b.name == brand.name)
        {
            return Err(SeedwaveError::Conflict(format!(
                "brand '{}' already exists in sector {}",
                brand.name, brand.sector_id
            )));
        }

        let row = Brand {
            id: tables.allocate_id(),
            name: brand.name.clone(),
            description: brand.description.clone(),
            sector_id: brand.sector_id,
            parent_id: brand.placement.parent_id(),
            is_core: brand.placement.is_core(),
            integration: brand.integration,
            status: brand.status,
            price: brand.price,
            metadata: brand.metadata.clone(),
        };
        tables.brands.push(row.clone());

        if let Some(sector) = tables.sector_mut(brand.sector_id) {
            if row.is_core {
                sector.brand_count += 1;
            } else {
                sector.subnode_count += 1;
            }
        }
        Ok(row)
    }

    async fn list_system_status(&self) -> Result<Vec<SystemStatus>> {
        Ok(self.tables.read().await.statuses.clone())
    }

    async fn get_system_status(&self, service: &str) -> Result<Option<SystemStatus>> {
        let tables = self.tables.read().await;
        Ok(tables.statuses.iter().find(|s| s.service == service).cloned())
    }

    async fn upsert_system_status(
        &self,
        service: &str,
        status: ServiceState,
    ) -> Result<SystemStatus> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        if let Some(existing) = tables.statuses.iter_mut().find(|s| s.service == service) {
            existing.status = status;
            existing.last_checked = now;
            return Ok(existing.clone());
        }
        let row = SystemStatus {
            id: tables.allocate_id(),
            service: service.to_string(),
            status,
            last_checked: now,
        };
        tables.statuses.push(row.clone());
        Ok(row)
    }

    async fn list_legal_documents(&self) -> Result<Vec<LegalDocument>> {
        Ok(self.tables.read().await.legal.clone())
    }

    async fn create_legal_document(&self, doc: &NewLegalDocument) -> Result<LegalDocument> {
        let mut tables = self.tables.write().await;
        let row = LegalDocument {
            id: tables.allocate_id(),
            title: doc.title.clone(),
            description: doc.description.clone(),
            url: doc.url.clone(),
            category: doc.category,
            tags: doc.tags.clone(),
            icon: doc.icon.clone(),
        };
        tables.legal.push(row.clone());
        Ok(row)
    }
}
