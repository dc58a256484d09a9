//! # mrm-db
//!
//! PostgreSQL database layer for the model registry.
//!
//! This crate provides:
//! - Connection pool management
//! - The four reference catalogs with idempotent bootstrap seeding
//! - The model record store
//! - The dynamic search/sort query builder over the joined projection
//!
//! ## Example
//!
//! ```rust,ignore
//! use mrm_db::Database;
//! use mrm_core::SearchModelsRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/mrm").await?;
//!     db.catalogs.seed_reference_data().await?;
//!
//!     let records = db
//!         .search
//!         .search(SearchModelsRequest {
//!             term: Some("banking".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{} records", records.len());
//!     Ok(())
//! }
//! ```

pub mod catalogs;
pub mod pool;
pub mod records;
pub mod search;

// Re-export core types
pub use mrm_core::*;

// Re-export repository implementations
pub use catalogs::PgCatalogRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use records::PgModelRepository;
pub use search::PgModelSearch;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Reference catalog repository (business lines, model types,
    /// risk ratings, statuses).
    pub catalogs: PgCatalogRepository,
    /// Model record repository for CRUD operations.
    pub models: PgModelRepository,
    /// Search provider over the joined record projection.
    pub search: PgModelSearch,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            catalogs: PgCatalogRepository::new(pool.clone()),
            models: PgModelRepository::new(pool.clone()),
            search: PgModelSearch::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
