//! Catalog domain types.
//! Pure value types: no sqlx. Row conversion lives in `seedwave_postgres`.

// Enums use `from_str() -> Option<Self>` rather than `FromStr` because
// unknown values are reported as None, not as an error type.
#![allow(clippy::should_implement_trait)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SeedwaveError;

// ── Enums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorStatus {
    #[default]
    Active,
    Maintenance,
    Offline,
}

impl SectorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Offline => "offline",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "maintenance" => Some(Self::Maintenance),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandStatus {
    Active,
    Maintenance,
    Offline,
    Pending,
}

impl BrandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Offline => "offline",
            Self::Pending => "pending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "maintenance" => Some(Self::Maintenance),
            "offline" => Some(Self::Offline),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Partner platform a brand nominally belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegrationTag {
    #[serde(rename = "VaultMesh™")]
    VaultMesh,
    #[serde(rename = "FAA.ZONE™")]
    FaaZone,
    #[serde(rename = "HotStack")]
    HotStack,
    #[serde(rename = "SecureSign™")]
    SecureSign,
    #[serde(rename = "King Price Integration")]
    KingPrice,
    /// Placeholder written by older seed runs.
    #[serde(rename = "active")]
    Legacy,
}

impl IntegrationTag {
    pub const ALL: [IntegrationTag; 6] = [
        Self::VaultMesh,
        Self::FaaZone,
        Self::HotStack,
        Self::SecureSign,
        Self::KingPrice,
        Self::Legacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VaultMesh => "VaultMesh™",
            Self::FaaZone => "FAA.ZONE™",
            Self::HotStack => "HotStack",
            Self::SecureSign => "SecureSign™",
            Self::KingPrice => "King Price Integration",
            Self::Legacy => "active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl std::fmt::Display for IntegrationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalCategory {
    Contracts,
    Technical,
    Minutes,
    Index,
}

impl LegalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contracts => "contracts",
            Self::Technical => "technical",
            Self::Minutes => "minutes",
            Self::Index => "index",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "contracts" => Some(Self::Contracts),
            "technical" => Some(Self::Technical),
            "minutes" => Some(Self::Minutes),
            "index" => Some(Self::Index),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Online,
    Maintenance,
    Active,
    Offline,
}

impl ServiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Maintenance => "maintenance",
            Self::Active => "active",
            Self::Offline => "offline",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "online" => Some(Self::Online),
            "maintenance" => Some(Self::Maintenance),
            "active" => Some(Self::Active),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }
}

// ── Metadata records ──────────────────────────────────────────

/// Recognised sector metadata keys. Unknown keys are dropped on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
}

/// Recognised brand metadata keys. Unknown keys are dropped on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integrations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
}

// ── Sector ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub status: SectorStatus,
    pub is_core: bool,
    /// Number of core brands in the sector.
    pub brand_count: i32,
    /// Number of subnodes in the sector.
    pub subnode_count: i32,
    pub metadata: SectorMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSector {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub status: SectorStatus,
    #[serde(default = "default_true")]
    pub is_core: bool,
    #[serde(default)]
    pub metadata: SectorMetadata,
}

fn default_true() -> bool {
    true
}

impl NewSector {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
            description: String::new(),
            price: None,
            status: SectorStatus::Active,
            is_core: true,
            metadata: SectorMetadata::default(),
        }
    }

    pub fn validate(&self) -> Result<(), SeedwaveError> {
        if self.name.trim().is_empty() {
            return Err(SeedwaveError::InvalidInput("sector name is required".into()));
        }
        validate_price(self.price)
    }
}

// ── Brand ─────────────────────────────────────────────────────

/// Where a brand sits in its sector's two-level tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandPlacement {
    Core,
    Subnode { parent_id: i64 },
}

impl BrandPlacement {
    pub fn is_core(&self) -> bool {
        matches!(self, Self::Core)
    }

    pub fn parent_id(&self) -> Option<i64> {
        match self {
            Self::Core => None,
            Self::Subnode { parent_id } => Some(*parent_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub sector_id: i64,
    pub parent_id: Option<i64>,
    pub is_core: bool,
    pub integration: IntegrationTag,
    pub status: BrandStatus,
    pub price: Option<Decimal>,
    pub metadata: BrandMetadata,
}

impl Brand {
    /// Reads the placement back out of the flat row. A row with
    /// `is_core = false` and no parent is reported as core.
    pub fn placement(&self) -> BrandPlacement {
        match (self.is_core, self.parent_id) {
            (false, Some(parent_id)) => BrandPlacement::Subnode { parent_id },
            _ => BrandPlacement::Core,
        }
    }
}

/// Create-brand payload as received over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrand {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sector_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub is_core: Option<bool>,
    pub integration: IntegrationTag,
    pub status: BrandStatus,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub metadata: BrandMetadata,
}

/// A create-brand payload that passed shape validation.
/// Store-level rules (sector exists, parent is a core brand of the
/// same sector) are checked by the store on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBrand {
    pub name: String,
    pub description: String,
    pub sector_id: i64,
    pub placement: BrandPlacement,
    pub integration: IntegrationTag,
    pub status: BrandStatus,
    pub price: Option<Decimal>,
    pub metadata: BrandMetadata,
}

impl NewBrand {
    pub fn core(name: impl Into<String>, sector_id: i64, integration: IntegrationTag) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            sector_id,
            parent_id: None,
            is_core: Some(true),
            integration,
            status: BrandStatus::Active,
            price: None,
            metadata: BrandMetadata::default(),
        }
    }

    pub fn subnode(
        name: impl Into<String>,
        sector_id: i64,
        parent_id: i64,
        integration: IntegrationTag,
    ) -> Self {
        Self {
            parent_id: Some(parent_id),
            is_core: Some(false),
            ..Self::core(name, sector_id, integration)
        }
    }

    pub fn validate(self) -> Result<ValidatedBrand, SeedwaveError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(SeedwaveError::InvalidInput("brand name is required".into()));
        }
        if self.sector_id <= 0 {
            return Err(SeedwaveError::InvalidInput(format!(
                "invalid sector id {}",
                self.sector_id
            )));
        }
        validate_price(self.price)?;

        let placement = match (self.is_core, self.parent_id) {
            (None | Some(true), None) => BrandPlacement::Core,
            (None | Some(false), Some(parent_id)) => BrandPlacement::Subnode { parent_id },
            (Some(true), Some(_)) => {
                return Err(SeedwaveError::InvalidInput(
                    "a core brand cannot have a parent".into(),
                ))
            }
            (Some(false), None) => {
                return Err(SeedwaveError::InvalidInput(
                    "a subnode requires a parentId".into(),
                ))
            }
        };

        Ok(ValidatedBrand {
            name,
            description: self.description,
            sector_id: self.sector_id,
            placement,
            integration: self.integration,
            status: self.status,
            price: self.price,
            metadata: self.metadata,
        })
    }
}

fn validate_price(price: Option<Decimal>) -> Result<(), SeedwaveError> {
    match price {
        Some(p) if p.is_sign_negative() && !p.is_zero() => Err(SeedwaveError::InvalidInput(
            "price must not be negative".into(),
        )),
        _ => Ok(()),
    }
}

// ── Legal documents / system status ───────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalDocument {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: LegalCategory,
    pub tags: Vec<String>,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLegalDocument {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    pub category: LegalCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon: String,
}

impl NewLegalDocument {
    pub fn validate(&self) -> Result<(), SeedwaveError> {
        if self.title.trim().is_empty() {
            return Err(SeedwaveError::InvalidInput("document title is required".into()));
        }
        if self.url.trim().is_empty() {
            return Err(SeedwaveError::InvalidInput("document url is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub id: i64,
    pub service: String,
    pub status: ServiceState,
    pub last_checked: DateTime<Utc>,
}

// ── Aggregates ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_elements: usize,
    pub core_brands: usize,
    pub subnodes: usize,
    pub sectors: usize,
}
