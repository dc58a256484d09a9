//! Core traits for model registry abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Catalog, CatalogEntry, ModelRecord, NewModel};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Inbound payload for registering or updating a model record.
///
/// All fields are required; the four classification fields carry catalog
/// codes that must resolve before the record is written.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelRequest {
    pub model_name: String,
    pub model_version: String,
    pub model_sponsor: String,
    pub business_line: String,
    pub model_type: String,
    pub risk_rating: String,
    pub status: String,
}

impl ModelRequest {
    /// Reject the request if any required field is missing or blank.
    ///
    /// Checks fields in declaration order and fails on the first blank one,
    /// before any catalog lookup or write is attempted.
    pub fn validate(&self) -> Result<()> {
        let required: [(&str, &str); 7] = [
            (&self.model_name, "Model name is required"),
            (&self.model_version, "Model version is required"),
            (&self.model_sponsor, "Model sponsor is required"),
            (&self.business_line, "Business line is required"),
            (&self.model_type, "Model type is required"),
            (&self.risk_rating, "Risk rating is required"),
            (&self.status, "Status is required"),
        ];
        for (value, message) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(message.to_string()));
            }
        }
        Ok(())
    }
}

/// Request for listing/searching model records.
///
/// An absent or blank `term` means no filter. An absent or unrecognized
/// `sort_key` yields descending-id order (newest first).
#[derive(Debug, Clone, Default)]
pub struct SearchModelsRequest {
    /// Free-text term matched case-insensitively across the searchable
    /// projections of a record.
    pub term: Option<String>,
    /// One of: "id", "modelName", "modelVersion", "modelSponsor",
    /// "businessLine", "modelType", "riskRating", "status", "createdAt".
    pub sort_key: Option<String>,
    /// "asc" or "desc", case-insensitive.
    pub sort_direction: Option<String>,
}

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Read/seed access to the four reference catalogs.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Look up a catalog entry by its stable code.
    async fn find_by_code(&self, catalog: Catalog, code: &str) -> Result<Option<CatalogEntry>>;

    /// List all entries of a catalog in insertion order.
    async fn list(&self, catalog: Catalog) -> Result<Vec<CatalogEntry>>;

    /// Count the entries of a catalog (used to guard idempotent seeding).
    async fn count(&self, catalog: Catalog) -> Result<i64>;

    /// Insert a new catalog entry. Only used by bootstrap seeding.
    async fn insert(&self, catalog: Catalog, code: &str, display_name: &str)
        -> Result<CatalogEntry>;
}

/// Repository for model record CRUD operations.
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Persist a new record, assigning id and timestamps. Returns the flat
    /// record with catalog codes and display names populated.
    async fn insert(&self, model: NewModel) -> Result<ModelRecord>;

    /// Replace name/version/sponsor/classifications of an existing record,
    /// preserving id and created_at and refreshing updated_at.
    async fn update(&self, id: i64, model: NewModel) -> Result<ModelRecord>;

    /// Fetch a record by id, joined against its catalogs.
    async fn fetch(&self, id: i64) -> Result<ModelRecord>;

    /// Check whether a record exists.
    async fn exists(&self, id: i64) -> Result<bool>;
}

/// Search provider over model records.
#[async_trait]
pub trait ModelSearch: Send + Sync {
    /// Run a filtered, sorted listing of model records.
    async fn search(&self, req: SearchModelsRequest) -> Result<Vec<ModelRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ModelRequest {
        ModelRequest {
            model_name: "Credit Scorecard".to_string(),
            model_version: "1.0".to_string(),
            model_sponsor: "Retail Analytics".to_string(),
            business_line: "RETAIL_BANKING".to_string(),
            model_type: "CREDIT_RISK".to_string(),
            risk_rating: "HIGH".to_string(),
            status: "IN_DEVELOPMENT".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_model_name() {
        let mut req = valid_request();
        req.model_name = "   ".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Model name is required");
    }

    #[test]
    fn test_validate_rejects_empty_status() {
        let mut req = valid_request();
        req.status = String::new();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Status is required");
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut req = valid_request();
        req.model_version = String::new();
        req.risk_rating = String::new();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Model version is required");
    }

    #[test]
    fn test_model_request_deserializes_camel_case() {
        let json = r#"{
            "modelName": "VaR Engine",
            "modelVersion": "2.1",
            "modelSponsor": "Quant Team",
            "businessLine": "INVESTMENT_BANKING",
            "modelType": "MARKET_RISK",
            "riskRating": "HIGH",
            "status": "PRODUCTION"
        }"#;
        let req: ModelRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.model_name, "VaR Engine");
        assert_eq!(req.business_line, "INVESTMENT_BANKING");
        assert!(req.validate().is_ok());
    }
}
