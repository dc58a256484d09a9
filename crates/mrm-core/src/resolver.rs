//! Classification resolution: catalog codes to catalog entries.
//!
//! Both the create and update paths run every inbound request through the
//! same resolver before anything touches the record store, so a model is
//! never persisted with a dangling classification reference.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Catalog, CatalogEntry, ResolvedClassifications};
use crate::traits::{CatalogRepository, ModelRequest};

/// Resolves the four classification codes of a request against the
/// reference catalogs.
///
/// Resolution is a pure sequence of lookups: the first unknown code aborts
/// with [`Error::UnknownClassification`] naming the catalog and the code.
/// There is no partial resolution and no error aggregation.
pub struct ClassificationResolver<'a, C: CatalogRepository + ?Sized> {
    catalogs: &'a C,
}

impl<'a, C: CatalogRepository + ?Sized> ClassificationResolver<'a, C> {
    /// Create a resolver over the given catalog repository.
    pub fn new(catalogs: &'a C) -> Self {
        Self { catalogs }
    }

    /// Resolve all four classification codes, failing fast on the first
    /// unknown one.
    pub async fn resolve(&self, req: &ModelRequest) -> Result<ResolvedClassifications> {
        let business_line = self.lookup(Catalog::BusinessLine, &req.business_line).await?;
        let model_type = self.lookup(Catalog::ModelType, &req.model_type).await?;
        let risk_rating = self.lookup(Catalog::RiskRating, &req.risk_rating).await?;
        let status = self.lookup(Catalog::Status, &req.status).await?;

        debug!(
            subsystem = "core",
            component = "resolver",
            op = "resolve",
            business_line = %business_line.code,
            model_type = %model_type.code,
            risk_rating = %risk_rating.code,
            status = %status.code,
            "Resolved all classification codes"
        );

        Ok(ResolvedClassifications {
            business_line,
            model_type,
            risk_rating,
            status,
        })
    }

    async fn lookup(&self, catalog: Catalog, code: &str) -> Result<CatalogEntry> {
        self.catalogs
            .find_by_code(catalog, code)
            .await?
            .ok_or_else(|| Error::UnknownClassification {
                catalog,
                code: code.to_string(),
            })
    }
}
