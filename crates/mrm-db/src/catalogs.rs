//! Reference catalog repository and bootstrap seeding.
//!
//! All four catalogs share the same physical shape (`id`, `code`,
//! `display_name`), so one repository serves them all; the [`Catalog`] enum
//! selects the table. Table names come from the closed enum mapping, never
//! from caller input.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};

use mrm_core::{Catalog, CatalogEntry, CatalogRepository, Error, Result};

/// Seed data for the business line catalog.
pub const BUSINESS_LINES: &[(&str, &str)] = &[
    ("RETAIL_BANKING", "Retail Banking"),
    ("WHOLESALE_LENDING", "Wholesale Lending"),
    ("INVESTMENT_BANKING", "Investment Banking"),
    ("RISK_MANAGEMENT", "Risk Management"),
];

/// Seed data for the model type catalog.
pub const MODEL_TYPES: &[(&str, &str)] = &[
    ("CREDIT_RISK", "Credit Risk"),
    ("MARKET_RISK", "Market Risk"),
    ("OPERATIONAL_RISK", "Operational Risk"),
    ("AML", "AML"),
    ("CAPITAL_CALCULATION", "Capital Calculation"),
    ("VALUATION", "Valuation"),
];

/// Seed data for the risk rating catalog.
pub const RISK_RATINGS: &[(&str, &str)] =
    &[("HIGH", "High"), ("MEDIUM", "Medium"), ("LOW", "Low")];

/// Seed data for the status catalog.
pub const STATUSES: &[(&str, &str)] = &[
    ("IN_DEVELOPMENT", "In Development"),
    ("VALIDATED", "Validated"),
    ("PRODUCTION", "Production"),
    ("RETIRED", "Retired"),
];

/// Seed pairs for the given catalog.
pub fn seed_data(catalog: Catalog) -> &'static [(&'static str, &'static str)] {
    match catalog {
        Catalog::BusinessLine => BUSINESS_LINES,
        Catalog::ModelType => MODEL_TYPES,
        Catalog::RiskRating => RISK_RATINGS,
        Catalog::Status => STATUSES,
    }
}

/// PostgreSQL implementation of CatalogRepository.
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: Pool<Postgres>,
}

impl PgCatalogRepository {
    /// Create a new PgCatalogRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Seed every catalog that is still empty with its fixed reference data.
    ///
    /// The guard is a count check per catalog, so re-running against a
    /// populated catalog is a no-op. Not safe under concurrent first-start;
    /// intended for single-instance bootstrap.
    pub async fn seed_reference_data(&self) -> Result<()> {
        for catalog in Catalog::ALL {
            let existing = self.count(catalog).await?;
            if existing > 0 {
                debug!(
                    subsystem = "database",
                    component = "catalogs",
                    op = "seed",
                    db_table = catalog.table(),
                    existing,
                    "Catalog already populated, skipping seed"
                );
                continue;
            }

            let pairs = seed_data(catalog);
            for (code, display_name) in pairs {
                self.insert(catalog, code, display_name).await?;
            }
            info!(
                subsystem = "database",
                component = "catalogs",
                op = "seed",
                db_table = catalog.table(),
                entry_count = pairs.len(),
                "Seeded reference catalog"
            );
        }
        Ok(())
    }
}

fn map_entry(row: sqlx::postgres::PgRow) -> CatalogEntry {
    CatalogEntry {
        id: row.get("id"),
        code: row.get("code"),
        display_name: row.get("display_name"),
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn find_by_code(&self, catalog: Catalog, code: &str) -> Result<Option<CatalogEntry>> {
        let sql = format!(
            "SELECT id, code, display_name FROM {} WHERE code = $1",
            catalog.table()
        );
        let row = sqlx::query(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.map(map_entry))
    }

    async fn list(&self, catalog: Catalog) -> Result<Vec<CatalogEntry>> {
        // Insertion order: ids are assigned by a sequence, so ascending id
        // reproduces the order the seed data was written in.
        let sql = format!(
            "SELECT id, code, display_name FROM {} ORDER BY id",
            catalog.table()
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(rows.into_iter().map(map_entry).collect())
    }

    async fn count(&self, catalog: Catalog) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", catalog.table());
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(count)
    }

    async fn insert(
        &self,
        catalog: Catalog,
        code: &str,
        display_name: &str,
    ) -> Result<CatalogEntry> {
        let sql = format!(
            "INSERT INTO {} (code, display_name) VALUES ($1, $2) \
             RETURNING id, code, display_name",
            catalog.table()
        );
        let row = sqlx::query(&sql)
            .bind(code)
            .bind(display_name)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(map_entry(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_cardinalities() {
        assert_eq!(BUSINESS_LINES.len(), 4);
        assert_eq!(MODEL_TYPES.len(), 6);
        assert_eq!(RISK_RATINGS.len(), 3);
        assert_eq!(STATUSES.len(), 4);
    }

    #[test]
    fn test_seed_codes_unique_per_catalog() {
        for catalog in Catalog::ALL {
            let pairs = seed_data(catalog);
            let codes: HashSet<_> = pairs.iter().map(|(code, _)| *code).collect();
            assert_eq!(codes.len(), pairs.len(), "duplicate code in {}", catalog);
        }
    }

    #[test]
    fn test_seed_data_matches_catalog() {
        assert!(seed_data(Catalog::BusinessLine)
            .iter()
            .any(|(code, display)| *code == "RETAIL_BANKING" && *display == "Retail Banking"));
        assert!(seed_data(Catalog::Status)
            .iter()
            .any(|(code, display)| *code == "RETIRED" && *display == "Retired"));
    }

    #[test]
    fn test_seed_display_names_non_empty() {
        for catalog in Catalog::ALL {
            for (code, display) in seed_data(catalog) {
                assert!(!code.is_empty());
                assert!(!display.is_empty());
            }
        }
    }
}
