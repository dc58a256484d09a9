//! Error types for the model registry.

use thiserror::Error;

use crate::models::Catalog;

/// Result type alias using the registry's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for model registry operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Model record not found by id
    #[error("Model not found with id: {0}")]
    ModelNotFound(i64),

    /// A classification code did not resolve in its catalog
    #[error("{catalog} not found: {code}")]
    UnknownClassification {
        /// Catalog the lookup ran against.
        catalog: Catalog,
        /// The code that failed to resolve.
        code: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_model_not_found() {
        let err = Error::ModelNotFound(42);
        assert_eq!(err.to_string(), "Model not found with id: 42");
    }

    #[test]
    fn test_error_display_unknown_classification() {
        let err = Error::UnknownClassification {
            catalog: Catalog::BusinessLine,
            code: "NOT_A_CODE".to_string(),
        };
        assert_eq!(err.to_string(), "Business line not found: NOT_A_CODE");
    }

    #[test]
    fn test_error_display_unknown_classification_per_catalog() {
        let err = Error::UnknownClassification {
            catalog: Catalog::RiskRating,
            code: "SEVERE".to_string(),
        };
        assert_eq!(err.to_string(), "Risk rating not found: SEVERE");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("Model name is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: Model name is required");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("DATABASE_URL not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: DATABASE_URL not set");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::ModelNotFound(7);
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ModelNotFound"));
    }
}
