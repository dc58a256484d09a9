//! Core data models for the model registry.
//!
//! These types are shared across all registry crates and represent the
//! reference-data catalogs, the model records they classify, and the flat
//! wire shapes exposed to the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// REFERENCE CATALOGS
// =============================================================================

/// The closed set of reference catalogs backing model classification.
///
/// Each variant maps to exactly one physical lookup table. Keeping the set
/// closed is what allows catalog-dependent SQL (table names, sort columns)
/// to be assembled without ever interpolating caller-supplied text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    BusinessLine,
    ModelType,
    RiskRating,
    Status,
}

impl Catalog {
    /// All catalogs, in the order they are seeded and rendered.
    pub const ALL: [Catalog; 4] = [
        Catalog::BusinessLine,
        Catalog::ModelType,
        Catalog::RiskRating,
        Catalog::Status,
    ];

    /// Physical table name for this catalog.
    pub fn table(&self) -> &'static str {
        match self {
            Catalog::BusinessLine => "business_lines",
            Catalog::ModelType => "model_types",
            Catalog::RiskRating => "risk_ratings",
            Catalog::Status => "statuses",
        }
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Catalog::BusinessLine => "Business line",
            Catalog::ModelType => "Model type",
            Catalog::RiskRating => "Risk rating",
            Catalog::Status => "Status",
        };
        f.write_str(label)
    }
}

/// One entry of a reference catalog: a stable code plus a display name
/// that may change without affecting the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub code: String,
    pub display_name: String,
}

/// A `{value, displayName}` pair used to populate choice inputs.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    pub value: String,
    pub display_name: String,
}

impl From<CatalogEntry> for ChoiceOption {
    fn from(entry: CatalogEntry) -> Self {
        ChoiceOption {
            value: entry.code,
            display_name: entry.display_name,
        }
    }
}

/// Choice lists for all four catalogs, keyed the way the UI expects them.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnumValuesResponse {
    pub business_lines: Vec<ChoiceOption>,
    pub model_types: Vec<ChoiceOption>,
    pub risk_ratings: Vec<ChoiceOption>,
    pub statuses: Vec<ChoiceOption>,
}

// =============================================================================
// MODEL RECORDS
// =============================================================================

/// Flat projection of a model record joined against its four catalog
/// entries: each classification carries both its code and display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub id: i64,
    pub model_name: String,
    pub model_version: String,
    pub model_sponsor: String,
    pub business_line: String,
    pub business_line_display_name: String,
    pub model_type: String,
    pub model_type_display_name: String,
    pub risk_rating: String,
    pub risk_rating_display_name: String,
    pub status: String,
    pub status_display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four classification references of a record, fully resolved against
/// their catalogs. Constructed only by the [`ClassificationResolver`], so a
/// value of this type is proof that every code was known at resolution time.
///
/// [`ClassificationResolver`]: crate::resolver::ClassificationResolver
#[derive(Debug, Clone)]
pub struct ResolvedClassifications {
    pub business_line: CatalogEntry,
    pub model_type: CatalogEntry,
    pub risk_rating: CatalogEntry,
    pub status: CatalogEntry,
}

/// A validated, classification-resolved model ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewModel {
    pub model_name: String,
    pub model_version: String,
    pub model_sponsor: String,
    pub classifications: ResolvedClassifications,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_table_names() {
        assert_eq!(Catalog::BusinessLine.table(), "business_lines");
        assert_eq!(Catalog::ModelType.table(), "model_types");
        assert_eq!(Catalog::RiskRating.table(), "risk_ratings");
        assert_eq!(Catalog::Status.table(), "statuses");
    }

    #[test]
    fn test_catalog_display_labels() {
        assert_eq!(Catalog::BusinessLine.to_string(), "Business line");
        assert_eq!(Catalog::Status.to_string(), "Status");
    }

    #[test]
    fn test_catalog_all_covers_every_variant() {
        assert_eq!(Catalog::ALL.len(), 4);
        let tables: std::collections::HashSet<_> =
            Catalog::ALL.iter().map(|c| c.table()).collect();
        assert_eq!(tables.len(), 4);
    }

    #[test]
    fn test_choice_option_from_catalog_entry() {
        let entry = CatalogEntry {
            id: 1,
            code: "RETAIL_BANKING".to_string(),
            display_name: "Retail Banking".to_string(),
        };
        let choice: ChoiceOption = entry.into();
        assert_eq!(choice.value, "RETAIL_BANKING");
        assert_eq!(choice.display_name, "Retail Banking");
    }

    #[test]
    fn test_choice_option_serializes_camel_case() {
        let choice = ChoiceOption {
            value: "HIGH".to_string(),
            display_name: "High".to_string(),
        };
        let json = serde_json::to_value(&choice).unwrap();
        assert_eq!(json["value"], "HIGH");
        assert_eq!(json["displayName"], "High");
    }

    #[test]
    fn test_model_record_serializes_camel_case() {
        let record = ModelRecord {
            id: 1,
            model_name: "VaR Engine".to_string(),
            model_version: "2.1".to_string(),
            model_sponsor: "Quant Team".to_string(),
            business_line: "INVESTMENT_BANKING".to_string(),
            business_line_display_name: "Investment Banking".to_string(),
            model_type: "MARKET_RISK".to_string(),
            model_type_display_name: "Market Risk".to_string(),
            risk_rating: "HIGH".to_string(),
            risk_rating_display_name: "High".to_string(),
            status: "PRODUCTION".to_string(),
            status_display_name: "Production".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["modelName"], "VaR Engine");
        assert_eq!(json["businessLineDisplayName"], "Investment Banking");
        assert_eq!(json["riskRating"], "HIGH");
        assert!(json.get("createdAt").is_some());
    }
}
