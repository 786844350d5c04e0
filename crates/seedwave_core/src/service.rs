//! CatalogService: the query/aggregate layer the HTTP handlers call.
//!
//! Holds the store behind `Arc<dyn CatalogStore>` so the same logic works
//! against Postgres or the in-memory store.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::error::SeedwaveError;
use crate::ports::{CatalogStore, Result};
use crate::types::*;

/// Brand listing filter. `search` wins when both are given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandQuery {
    pub search: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub sector_id: Option<i64>,
}

/// Query-string id: absent or blank is `None`, anything non-numeric is an error.
pub fn optional_id<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<i64>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    // ── Sectors ──

    pub async fn list_sectors(&self) -> Result<Vec<Sector>> {
        self.store.list_sectors().await
    }

    pub async fn get_sector(&self, id: i64) -> Result<Sector> {
        self.store
            .get_sector(id)
            .await?
            .ok_or_else(|| SeedwaveError::NotFound("Sector not found".into()))
    }

    pub async fn create_sector(&self, sector: NewSector) -> Result<Sector> {
        sector.validate()?;
        let created = self.store.create_sector(&sector).await?;
        tracing::info!(sector_id = created.id, name = %created.name, "sector created");
        Ok(created)
    }

    // ── Brands ──

    pub async fn list_brands(&self, query: &BrandQuery) -> Result<Vec<Brand>> {
        match (query.search.as_deref(), query.sector_id) {
            (Some(term), _) if !term.is_empty() => self.store.search_brands(term).await,
            (_, Some(sector_id)) => self.store.brands_by_sector(sector_id).await,
            _ => self.store.list_brands().await,
        }
    }

    pub async fn get_brand(&self, id: i64) -> Result<Brand> {
        self.store
            .get_brand(id)
            .await?
            .ok_or_else(|| SeedwaveError::NotFound("Brand not found".into()))
    }

    pub async fn create_brand(&self, brand: NewBrand) -> Result<Brand> {
        let validated = brand.validate()?;
        let created = self.store.create_brand(&validated).await?;
        tracing::info!(
            brand_id = created.id,
            sector_id = created.sector_id,
            is_core = created.is_core,
            "brand created"
        );
        Ok(created)
    }

    // ── System status ──

    pub async fn list_system_status(&self) -> Result<Vec<SystemStatus>> {
        self.store.list_system_status().await
    }

    pub async fn get_system_status(&self, service: &str) -> Result<SystemStatus> {
        self.store
            .get_system_status(service)
            .await?
            .ok_or_else(|| SeedwaveError::NotFound("Service not found".into()))
    }

    // ── Legal documents ──

    pub async fn list_legal_documents(&self) -> Result<Vec<LegalDocument>> {
        self.store.list_legal_documents().await
    }

    pub async fn create_legal_document(&self, doc: NewLegalDocument) -> Result<LegalDocument> {
        doc.validate()?;
        self.store.create_legal_document(&doc).await
    }

    // ── Dashboard ──

    /// Counts over a full listing of brands and sectors. O(n) per call.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let brands = self.store.list_brands().await?;
        let sectors = self.store.list_sectors().await?;
        let core_brands = brands.iter().filter(|b| b.is_core).count();
        Ok(DashboardStats {
            total_elements: brands.len(),
            core_brands,
            subnodes: brands.len() - core_brands,
            sectors: sectors.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalogStore;

    async fn seeded_service() -> (CatalogService, i64, i64) {
        let service = CatalogService::new(Arc::new(InMemoryCatalogStore::new()));
        let agri = service
            .create_sector(NewSector::new("🌱 Agriculture & Biotech", "🌱"))
            .await
            .unwrap();
        let media = service
            .create_sector(NewSector::new("🎵 Music & Sound Design", "🎵"))
            .await
            .unwrap();
        let core = service
            .create_brand(NewBrand::core("AgriTech Solutions", agri.id, IntegrationTag::VaultMesh))
            .await
            .unwrap();
        service
            .create_brand(NewBrand::subnode(
                "AgriSub-Alpha",
                agri.id,
                core.id,
                IntegrationTag::VaultMesh,
            ))
            .await
            .unwrap();
        service
            .create_brand(NewBrand::core("SonicGrid", media.id, IntegrationTag::VaultMesh))
            .await
            .unwrap();
        (service, agri.id, media.id)
    }

    #[tokio::test]
    async fn list_brands_by_sector_only_returns_that_sector() {
        let (service, agri, _) = seeded_service().await;
        let brands = service
            .list_brands(&BrandQuery {
                search: None,
                sector_id: Some(agri),
            })
            .await
            .unwrap();
        assert_eq!(brands.len(), 2);
        assert!(brands.iter().all(|b| b.sector_id == agri));
    }

    #[tokio::test]
    async fn search_takes_precedence_over_sector() {
        let (service, agri, _) = seeded_service().await;
        let brands = service
            .list_brands(&BrandQuery {
                search: Some("sonic".into()),
                sector_id: Some(agri),
            })
            .await
            .unwrap();
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].name, "SonicGrid");
    }

    #[tokio::test]
    async fn empty_search_falls_through_to_all() {
        let (service, _, _) = seeded_service().await;
        let brands = service
            .list_brands(&BrandQuery {
                search: Some(String::new()),
                sector_id: None,
            })
            .await
            .unwrap();
        assert_eq!(brands.len(), 3);
    }

    #[test]
    fn brand_query_sector_id_parsing() {
        let q: BrandQuery = serde_json::from_value(serde_json::json!({"sectorId": "7"})).unwrap();
        assert_eq!(q.sector_id, Some(7));
        let q: BrandQuery = serde_json::from_value(serde_json::json!({"sectorId": ""})).unwrap();
        assert_eq!(q.sector_id, None);
        let q: BrandQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(q.sector_id, None);
        assert!(serde_json::from_value::<BrandQuery>(serde_json::json!({"sectorId": "abc"})).is_err());
    }

    #[tokio::test]
    async fn dashboard_stats_partition_brands() {
        let (service, _, _) = seeded_service().await;
        let stats = service.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_elements, 3);
        assert_eq!(stats.core_brands, 2);
        assert_eq!(stats.subnodes, 1);
        assert_eq!(stats.core_brands + stats.subnodes, stats.total_elements);
        assert_eq!(stats.sectors, 2);
    }

    #[tokio::test]
    async fn missing_sector_is_not_found() {
        let (service, _, _) = seeded_service().await;
        let err = service.get_sector(999_999).await.unwrap_err();
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.to_string(), "not found: Sector not found");
    }

    #[tokio::test]
    async fn every_parent_is_core_and_in_same_sector() {
        let (service, _, _) = seeded_service().await;
        let brands = service.list_brands(&BrandQuery::default()).await.unwrap();
        for brand in brands.iter().filter(|b| b.parent_id.is_some()) {
            let parent = service.get_brand(brand.parent_id.unwrap()).await.unwrap();
            assert!(parent.is_core);
            assert_eq!(parent.sector_id, brand.sector_id);
        }
    }
}
