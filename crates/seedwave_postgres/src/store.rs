//! Postgres implementation of the `CatalogStore` port.
//!
//! All SQL is runtime-checked (`sqlx::query_as`, not `sqlx::query!`) so the
//! crate builds without a live database.

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use seedwave_core::error::SeedwaveError;
use seedwave_core::ports::{check_subnode_parent, CatalogStore, Result};
use seedwave_core::types::*;

use crate::sqlx_types::{PgBrandRow, PgLegalDocumentRow, PgSectorRow, PgSystemStatusRow};

const SECTOR_COLUMNS: &str = "id, name, emoji, description, price, status, is_core, \
     brand_count, subnode_count, metadata";
const BRAND_COLUMNS: &str = "id, name, description, sector_id, parent_id, is_core, \
     integration, status, price, metadata";
const LEGAL_COLUMNS: &str = "id, title, description, url, category, tags, icon";
const STATUS_COLUMNS: &str = "id, service, status, last_checked";

/// Map a driver error onto the core taxonomy. Constraint violations become
/// client errors; everything else is internal.
fn db_err(e: sqlx::Error) -> SeedwaveError {
    if let sqlx::Error::Database(db) = &e {
        match db.code().as_deref() {
            Some("23505") => return SeedwaveError::Conflict(db.message().to_string()),
            Some("23503") | Some("23514") => {
                return SeedwaveError::InvalidInput(db.message().to_string())
            }
            _ => {}
        }
    }
    SeedwaveError::Internal(anyhow!(e))
}

fn row_err(e: String) -> SeedwaveError {
    SeedwaveError::Internal(anyhow!(e))
}

fn convert<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(|r| T::try_from(r).map_err(row_err))
        .collect()
}

/// Escape LIKE metacharacters so the term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn brand_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<Brand>> {
        let row = sqlx::query_as::<_, PgBrandRow>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(db_err)?;
        row.map(|r| Brand::try_from(r).map_err(row_err)).transpose()
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_sectors(&self) -> Result<Vec<Sector>> {
        let rows = sqlx::query_as::<_, PgSectorRow>(&format!(
            "SELECT {SECTOR_COLUMNS} FROM sectors ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        convert(rows)
    }

    async fn get_sector(&self, id: i64) -> Result<Option<Sector>> {
        let row = sqlx::query_as::<_, PgSectorRow>(&format!(
            "SELECT {SECTOR_COLUMNS} FROM sectors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| Sector::try_from(r).map_err(row_err)).transpose()
    }

    async fn find_sector_by_name(&self, name: &str) -> Result<Option<Sector>> {
        let row = sqlx::query_as::<_, PgSectorRow>(&format!(
            "SELECT {SECTOR_COLUMNS} FROM sectors WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| Sector::try_from(r).map_err(row_err)).transpose()
    }

    async fn create_sector(&self, sector: &NewSector) -> Result<Sector> {
        let metadata = serde_json::to_value(&sector.metadata)?;
        let row = sqlx::query_as::<_, PgSectorRow>(&format!(
            r#"
            INSERT INTO sectors (name, emoji, description, price, status, is_core, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SECTOR_COLUMNS}
            "#
        ))
        .bind(&sector.name)
        .bind(&sector.emoji)
        .bind(&sector.description)
        .bind(sector.price)
        .bind(sector.status.as_str())
        .bind(sector.is_core)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Sector::try_from(row).map_err(row_err)
    }

    async fn recount_sector(&self, id: i64) -> Result<Sector> {
        let row = sqlx::query_as::<_, PgSectorRow>(&format!(
            r#"
            UPDATE sectors SET
                brand_count = (SELECT count(*)::int FROM brands
                               WHERE sector_id = $1 AND is_core),
                subnode_count = (SELECT count(*)::int FROM brands
                                 WHERE sector_id = $1 AND NOT is_core)
            WHERE id = $1
            RETURNING {SECTOR_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or_else(|| SeedwaveError::NotFound(format!("sector {id}")))?;
        Sector::try_from(row).map_err(row_err)
    }

    async fn list_brands(&self) -> Result<Vec<Brand>> {
        let rows = sqlx::query_as::<_, PgBrandRow>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        convert(rows)
    }

    async fn get_brand(&self, id: i64) -> Result<Option<Brand>> {
        let row = sqlx::query_as::<_, PgBrandRow>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| Brand::try_from(r).map_err(row_err)).transpose()
    }

    async fn brands_by_sector(&self, sector_id: i64) -> Result<Vec<Brand>> {
        let rows = sqlx::query_as::<_, PgBrandRow>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands WHERE sector_id = $1 ORDER BY id"
        ))
        .bind(sector_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        convert(rows)
    }

    async fn search_brands(&self, term: &str) -> Result<Vec<Brand>> {
        let rows = sqlx::query_as::<_, PgBrandRow>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands WHERE name ILIKE $1 ORDER BY id"
        ))
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        convert(rows)
    }

    /// Insert and count bump share one transaction; the sector row is
    /// locked first so concurrent inserts serialise per sector.
    async fn create_brand(&self, brand: &ValidatedBrand) -> Result<Brand> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let sector = sqlx::query_scalar::<_, i64>("SELECT id FROM sectors WHERE id = $1 FOR UPDATE")
            .bind(brand.sector_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        if sector.is_none() {
            return Err(SeedwaveError::InvalidInput(format!(
                "sector {} does not exist",
                brand.sector_id
            )));
        }

        let parent = match brand.placement.parent_id() {
            Some(pid) => Self::brand_in_tx(&mut tx, pid).await?,
            None => None,
        };
        check_subnode_parent(brand, parent.as_ref())?;

        let metadata = serde_json::to_value(&brand.metadata)?;
        let row = sqlx::query_as::<_, PgBrandRow>(&format!(
            r#"
            INSERT INTO brands (name, description, sector_id, parent_id, is_core,
                                integration, status, price, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {BRAND_COLUMNS}
            "#
        ))
        .bind(&brand.name)
        .bind(&brand.description)
        .bind(brand.sector_id)
        .bind(brand.placement.parent_id())
        .bind(brand.placement.is_core())
        .bind(brand.integration.as_str())
        .bind(brand.status.as_str())
        .bind(brand.price)
        .bind(metadata)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        let bump = if brand.placement.is_core() {
            "UPDATE sectors SET brand_count = brand_count + 1 WHERE id = $1"
        } else {
            "UPDATE sectors SET subnode_count = subnode_count + 1 WHERE id = $1"
        };
        sqlx::query(bump)
            .bind(brand.sector_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Brand::try_from(row).map_err(row_err)
    }

    async fn list_system_status(&self) -> Result<Vec<SystemStatus>> {
        let rows = sqlx::query_as::<_, PgSystemStatusRow>(&format!(
            "SELECT {STATUS_COLUMNS} FROM system_status ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        convert(rows)
    }

    async fn get_system_status(&self, service: &str) -> Result<Option<SystemStatus>> {
        let row = sqlx::query_as::<_, PgSystemStatusRow>(&format!(
            "SELECT {STATUS_COLUMNS} FROM system_status WHERE service = $1"
        ))
        .bind(service)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| SystemStatus::try_from(r).map_err(row_err))
            .transpose()
    }

    async fn upsert_system_status(
        &self,
        service: &str,
        status: ServiceState,
    ) -> Result<SystemStatus> {
        let row = sqlx::query_as::<_, PgSystemStatusRow>(&format!(
            r#"
            INSERT INTO system_status (service, status)
            VALUES ($1, $2)
            ON CONFLICT (service) DO UPDATE
               SET status = EXCLUDED.status, last_checked = now()
            RETURNING {STATUS_COLUMNS}
            "#
        ))
        .bind(service)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        SystemStatus::try_from(row).map_err(row_err)
    }

    async fn list_legal_documents(&self) -> Result<Vec<LegalDocument>> {
        let rows = sqlx::query_as::<_, PgLegalDocumentRow>(&format!(
            "SELECT {LEGAL_COLUMNS} FROM legal_documents ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        convert(rows)
    }

    async fn create_legal_document(&self, doc: &NewLegalDocument) -> Result<LegalDocument> {
        let row = sqlx::query_as::<_, PgLegalDocumentRow>(&format!(
            r#"
            INSERT INTO legal_documents (title, description, url, category, tags, icon)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LEGAL_COLUMNS}
            "#
        ))
        .bind(&doc.title)
        .bind(&doc.description)
        .bind(&doc.url)
        .bind(doc.category.as_str())
        .bind(&doc.tags)
        .bind(&doc.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        LegalDocument::try_from(row).map_err(row_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("agri"), "%agri%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn non_database_errors_are_internal() {
        let err = db_err(sqlx::Error::RowNotFound);
        assert_eq!(err.http_status(), 500);
    }
}
