//! Row types with `sqlx::FromRow`, converted into the pure core types.
//!
//! Enum and JSONB columns come back as text / `serde_json::Value` and are
//! parsed here; a value the core types do not recognise is a `String` error.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use seedwave_core::types::*;

#[derive(Debug, sqlx::FromRow)]
pub struct PgSectorRow {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub status: String,
    pub is_core: bool,
    pub brand_count: i32,
    pub subnode_count: i32,
    pub metadata: serde_json::Value,
}

impl TryFrom<PgSectorRow> for Sector {
    type Error = String;

    fn try_from(row: PgSectorRow) -> Result<Self, Self::Error> {
        Ok(Sector {
            id: row.id,
            status: SectorStatus::from_str(&row.status)
                .ok_or_else(|| format!("unknown sector status '{}'", row.status))?,
            metadata: serde_json::from_value(row.metadata)
                .map_err(|e| format!("sector {} metadata: {e}", row.id))?,
            name: row.name,
            emoji: row.emoji,
            description: row.description,
            price: row.price,
            is_core: row.is_core,
            brand_count: row.brand_count,
            subnode_count: row.subnode_count,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct PgBrandRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub sector_id: i64,
    pub parent_id: Option<i64>,
    pub is_core: bool,
    pub integration: String,
    pub status: String,
    pub price: Option<Decimal>,
    pub metadata: serde_json::Value,
}

impl TryFrom<PgBrandRow> for Brand {
    type Error = String;

    fn try_from(row: PgBrandRow) -> Result<Self, Self::Error> {
        Ok(Brand {
            id: row.id,
            integration: IntegrationTag::from_str(&row.integration)
                .ok_or_else(|| format!("unknown integration '{}'", row.integration))?,
            status: BrandStatus::from_str(&row.status)
                .ok_or_else(|| format!("unknown brand status '{}'", row.status))?,
            metadata: serde_json::from_value(row.metadata)
                .map_err(|e| format!("brand {} metadata: {e}", row.id))?,
            name: row.name,
            description: row.description,
            sector_id: row.sector_id,
            parent_id: row.parent_id,
            is_core: row.is_core,
            price: row.price,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct PgLegalDocumentRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub icon: String,
}

impl TryFrom<PgLegalDocumentRow> for LegalDocument {
    type Error = String;

    fn try_from(row: PgLegalDocumentRow) -> Result<Self, Self::Error> {
        Ok(LegalDocument {
            id: row.id,
            category: LegalCategory::from_str(&row.category)
                .ok_or_else(|| format!("unknown legal category '{}'", row.category))?,
            title: row.title,
            description: row.description,
            url: row.url,
            tags: row.tags,
            icon: row.icon,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct PgSystemStatusRow {
    pub id: i64,
    pub service: String,
    pub status: String,
    pub last_checked: DateTime<Utc>,
}

impl TryFrom<PgSystemStatusRow> for SystemStatus {
    type Error = String;

    fn try_from(row: PgSystemStatusRow) -> Result<Self, Self::Error> {
        Ok(SystemStatus {
            id: row.id,
            status: ServiceState::from_str(&row.status)
                .ok_or_else(|| format!("unknown service status '{}'", row.status))?,
            service: row.service,
            last_checked: row.last_checked,
        })
    }
}
