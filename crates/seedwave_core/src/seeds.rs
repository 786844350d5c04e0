//! SeedBundle and Seeder: idempotent bootstrap of the catalog tables.
//!
//! The bundle is a fixed literal catalog. The seeder goes through
//! `CatalogStore` only, so it runs the same against Postgres and the
//! in-memory store. Re-running it against a seeded store inserts nothing.

use serde::Serialize;

use crate::error::SeedwaveError;
use crate::ports::{CatalogStore, Result};
use crate::types::IntegrationTag::{FaaZone, HotStack, VaultMesh};
use crate::types::*;

// Seed DTOs: pure data, no store types.

#[derive(Debug, Clone, PartialEq)]
pub struct SectorSeed {
    pub name: &'static str,
    pub emoji: &'static str,
    pub tier: &'static str,
    pub brands: &'static [CoreBrandSeed],
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreBrandSeed {
    pub name: &'static str,
    pub integration: IntegrationTag,
    pub subnodes: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedBundle {
    pub sectors: Vec<SectorSeed>,
    pub legal_documents: Vec<NewLegalDocument>,
    pub statuses: Vec<(&'static str, ServiceState)>,
}

const fn core_brand(
    name: &'static str,
    integration: IntegrationTag,
    subnodes: &'static [&'static str],
) -> CoreBrandSeed {
    CoreBrandSeed {
        name,
        integration,
        subnodes,
    }
}

const STANDARD_SECTORS: &[SectorSeed] = &[
    SectorSeed {
        name: "Agriculture & Biotech",
        emoji: "🌱",
        tier: "A+",
        brands: &[
            core_brand("AgriTech Solutions", VaultMesh, &["AgriSub-Alpha", "CropSense Node"]),
            core_brand("SoilCore", HotStack, &["SoilCore Node 1"]),
            core_brand("HarvestVault", FaaZone, &[]),
        ],
    },
    SectorSeed {
        name: "Banking & Finance",
        emoji: "🏦",
        tier: "A+",
        brands: &[
            core_brand("FinanceFlow", FaaZone, &["FinSub-Beta"]),
            core_brand("WealthVault", VaultMesh, &["WealthVault Node 1", "WealthVault Node 2"]),
        ],
    },
    SectorSeed {
        name: "Mining & Resources",
        emoji: "⛏️",
        tier: "A",
        brands: &[
            core_brand("MineTrace Analytics", HotStack, &["OreScan Node"]),
            core_brand("MineNest", VaultMesh, &[]),
        ],
    },
    SectorSeed {
        name: "Motion, Media & Sonic",
        emoji: "🎬",
        tier: "A",
        brands: &[
            core_brand("SonicGrid", VaultMesh, &["Rhythm Sync Engine", "Beat Detection AI"]),
            core_brand("Dance Floor Analytics", FaaZone, &[]),
        ],
    },
    SectorSeed {
        name: "Utilities & Energy",
        emoji: "⚡",
        tier: "A",
        brands: &[
            core_brand("PowerNode", FaaZone, &["GridSync Node"]),
            core_brand("EnergyForge", HotStack, &[]),
        ],
    },
    SectorSeed {
        name: "Logistics & Packaging",
        emoji: "📦",
        tier: "B+",
        brands: &[
            core_brand("MeshForge", HotStack, &["MeshForge Node 1"]),
            core_brand("LogiVault", VaultMesh, &[]),
        ],
    },
    SectorSeed {
        name: "Quantum Protocols",
        emoji: "⚛️",
        tier: "B+",
        brands: &[core_brand("QuantumForge", VaultMesh, &["ProtocolSync Node"])],
    },
    SectorSeed {
        name: "Housing & Infrastructure",
        emoji: "🏗️",
        tier: "B+",
        brands: &[
            core_brand("VaultMesh Core", VaultMesh, &["BuildHub Node"]),
            core_brand("StructureCore", HotStack, &[]),
        ],
    },
];

fn legal(
    title: &str,
    description: &str,
    url: &str,
    category: LegalCategory,
    tags: &[&str],
    icon: &str,
) -> NewLegalDocument {
    NewLegalDocument {
        title: title.into(),
        description: description.into(),
        url: url.into(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        icon: icon.into(),
    }
}

impl SeedBundle {
    /// The catalog every fresh deployment starts from.
    pub fn standard() -> Self {
        use crate::types::LegalCategory::*;
        Self {
            sectors: STANDARD_SECTORS.to_vec(),
            legal_documents: vec![
                legal(
                    "Fruitful Holdings NDA",
                    "Non-disclosure agreement for Fruitful Holdings operations and partnerships",
                    "/legal-docs/fruitful-holdings-nda",
                    Contracts,
                    &["nda", "contracts", "fruitful"],
                    "📄",
                ),
                legal(
                    "SecureSign™ Portal Documentation",
                    "Complete SecureSign™ NDA portal setup and integration guide",
                    "/legal-docs/securesign-portal",
                    Technical,
                    &["securesign", "portal", "technical"],
                    "🔒",
                ),
                legal(
                    "Seedwave™ Deployment Manual",
                    "Comprehensive deployment manual for Seedwave™ portal infrastructure",
                    "/legal-docs/seedwave-deployment",
                    Technical,
                    &["seedwave", "deployment", "manual"],
                    "🌱",
                ),
                legal(
                    "FAA Zone Meeting Minutes",
                    "Minutes of meeting for FAA zone integration and setup",
                    "/legal-docs/faa-zone-minutes",
                    Minutes,
                    &["faa", "meeting", "minutes"],
                    "✈️",
                ),
                legal(
                    "Firebase Core Minutes",
                    "Firebase integration meeting notes and technical decisions",
                    "/legal-docs/firebase-integration",
                    Minutes,
                    &["firebase", "integration", "minutes"],
                    "🔥",
                ),
                legal(
                    "PayPal Integration Guide",
                    "PayPal payment integration setup and configuration guide",
                    "/legal-docs/paypal-setup",
                    Technical,
                    &["paypal", "integration", "payment"],
                    "💳",
                ),
                legal(
                    "Repository & Legal Hub Index",
                    "Main index for repository management and legal documentation",
                    "/legal-docs/repository-index",
                    Index,
                    &["repository", "index", "legal"],
                    "📚",
                ),
                legal(
                    "CodeNest Settings & Configuration",
                    "CodeNest development environment setup and configuration",
                    "/legal-docs/codenest-settings",
                    Technical,
                    &["codenest", "configuration", "development"],
                    "⚙️",
                ),
            ],
            statuses: vec![
                ("VaultMesh™", ServiceState::Online),
                ("HotStack", ServiceState::Maintenance),
                ("FAA.ZONE™", ServiceState::Online),
                ("SecureSign™", ServiceState::Online),
                ("King Price Integration", ServiceState::Active),
            ],
        }
    }

    pub fn brand_total(&self) -> usize {
        self.sectors
            .iter()
            .flat_map(|s| s.brands)
            .map(|b| 1 + b.subnodes.len())
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    pub skip_legal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub sectors_inserted: usize,
    pub sectors_skipped: usize,
    pub brands_inserted: usize,
    pub brands_skipped: usize,
    pub legal_documents_inserted: usize,
    pub statuses_upserted: usize,
}

impl SeedReport {
    pub fn inserted(&self) -> usize {
        self.sectors_inserted + self.brands_inserted + self.legal_documents_inserted
    }
}

pub struct Seeder<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> Seeder<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub async fn run(&self, bundle: &SeedBundle, options: SeedOptions) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for seed in &bundle.sectors {
            let sector = self.ensure_sector(seed, &mut report).await?;
            for brand in seed.brands {
                let core = NewBrand::core(brand.name, sector.id, brand.integration);
                let core_id = self.ensure_brand(core, &mut report).await?;
                for sub in brand.subnodes {
                    self.ensure_brand(
                        NewBrand::subnode(*sub, sector.id, core_id, brand.integration),
                        &mut report,
                    )
                    .await?;
                }
            }
            let sector = self.store.recount_sector(sector.id).await?;
            tracing::debug!(
                sector = %sector.name,
                brands = sector.brand_count,
                subnodes = sector.subnode_count,
                "sector seeded"
            );
        }

        if options.skip_legal {
            tracing::info!("legal documents skipped");
        } else if self.store.list_legal_documents().await?.is_empty() {
            for doc in &bundle.legal_documents {
                self.store.create_legal_document(doc).await?;
                report.legal_documents_inserted += 1;
            }
        } else {
            tracing::info!("legal documents already present, skipping");
        }

        for (service, state) in &bundle.statuses {
            self.store.upsert_system_status(service, *state).await?;
            report.statuses_upserted += 1;
        }

        tracing::info!(
            sectors_inserted = report.sectors_inserted,
            brands_inserted = report.brands_inserted,
            brands_skipped = report.brands_skipped,
            legal_inserted = report.legal_documents_inserted,
            "seed complete"
        );
        Ok(report)
    }

    async fn ensure_sector(&self, seed: &SectorSeed, report: &mut SeedReport) -> Result<Sector> {
        if let Some(existing) = self.store.find_sector_by_name(seed.name).await? {
            report.sectors_skipped += 1;
            return Ok(existing);
        }
        let mut new = NewSector::new(seed.name, seed.emoji);
        new.description = format!("{} solutions and infrastructure", seed.name);
        new.metadata.tier = Some(seed.tier.to_string());
        new.metadata.category = Some(seed.name.to_string());
        match self.store.create_sector(&new).await {
            Ok(sector) => {
                report.sectors_inserted += 1;
                Ok(sector)
            }
            // Lost a race with a concurrent seeder.
            Err(SeedwaveError::Conflict(_)) => {
                report.sectors_skipped += 1;
                self.store
                    .find_sector_by_name(seed.name)
                    .await?
                    .ok_or_else(|| SeedwaveError::NotFound(format!("sector '{}'", seed.name)))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the id of the brand, inserted or already present.
    async fn ensure_brand(&self, brand: NewBrand, report: &mut SeedReport) -> Result<i64> {
        if let Some(id) = self.existing_brand_id(brand.sector_id, &brand.name).await? {
            report.brands_skipped += 1;
            return Ok(id);
        }
        let (sector_id, name) = (brand.sector_id, brand.name.clone());
        let validated = brand.validate()?;
        match self.store.create_brand(&validated).await {
            Ok(created) => {
                report.brands_inserted += 1;
                Ok(created.id)
            }
            Err(SeedwaveError::Conflict(_)) => {
                report.brands_skipped += 1;
                self.existing_brand_id(sector_id, &name)
                    .await?
                    .ok_or_else(|| SeedwaveError::NotFound(format!("brand '{name}'")))
            }
            Err(e) => Err(e),
        }
    }

    async fn existing_brand_id(&self, sector_id: i64, name: &str) -> Result<Option<i64>> {
        Ok(self
            .store
            .brands_by_sector(sector_id)
            .await?
            .into_iter()
            .find(|b| b.name == name)
            .map(|b| b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalogStore;

    #[tokio::test]
    async fn seeding_twice_inserts_nothing_the_second_time() {
        let store = InMemoryCatalogStore::new();
        let bundle = SeedBundle::standard();
        let seeder = Seeder::new(&store);

        let first = seeder.run(&bundle, SeedOptions::default()).await.unwrap();
        assert_eq!(first.sectors_inserted, bundle.sectors.len());
        assert_eq!(first.brands_inserted, bundle.brand_total());
        assert_eq!(first.legal_documents_inserted, 8);
        assert_eq!(first.statuses_upserted, 5);

        let second = seeder.run(&bundle, SeedOptions::default()).await.unwrap();
        assert_eq!(second.inserted(), 0);
        assert_eq!(second.brands_skipped, bundle.brand_total());
        assert_eq!(store.list_system_status().await.unwrap().len(), 5);
        assert_eq!(store.list_legal_documents().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn sector_counts_match_brand_rows() {
        let store = InMemoryCatalogStore::new();
        Seeder::new(&store)
            .run(&SeedBundle::standard(), SeedOptions::default())
            .await
            .unwrap();
        let brands = store.list_brands().await.unwrap();
        for sector in store.list_sectors().await.unwrap() {
            let core = brands
                .iter()
                .filter(|b| b.sector_id == sector.id && b.is_core)
                .count();
            let sub = brands
                .iter()
                .filter(|b| b.sector_id == sector.id && !b.is_core)
                .count();
            assert_eq!(sector.brand_count as usize, core, "{}", sector.name);
            assert_eq!(sector.subnode_count as usize, sub, "{}", sector.name);
        }
    }

    #[tokio::test]
    async fn skip_legal_leaves_documents_empty() {
        let store = InMemoryCatalogStore::new();
        let report = Seeder::new(&store)
            .run(&SeedBundle::standard(), SeedOptions { skip_legal: true })
            .await
            .unwrap();
        assert_eq!(report.legal_documents_inserted, 0);
        assert!(store.list_legal_documents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn existing_legal_documents_are_left_alone() {
        let store = InMemoryCatalogStore::new();
        let bundle = SeedBundle::standard();
        store
            .create_legal_document(&bundle.legal_documents[0])
            .await
            .unwrap();
        let report = Seeder::new(&store)
            .run(&bundle, SeedOptions::default())
            .await
            .unwrap();
        assert_eq!(report.legal_documents_inserted, 0);
        assert_eq!(store.list_legal_documents().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn subnodes_hang_off_their_core_brand() {
        let store = InMemoryCatalogStore::new();
        Seeder::new(&store)
            .run(&SeedBundle::standard(), SeedOptions::default())
            .await
            .unwrap();
        let hits = store.search_brands("FinSub-Beta").await.unwrap();
        assert_eq!(hits.len(), 1);
        let parent = store
            .get_brand(hits[0].parent_id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(parent.name, "FinanceFlow");
        assert!(parent.is_core);
    }
}
