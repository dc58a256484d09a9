//! # mrm-core
//!
//! Core types, traits, and classification resolution for the model registry.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the database and API crates depend on: the reference
//! catalog model, the flat model record projection, the error taxonomy,
//! and the resolver that turns inbound classification codes into catalog
//! entries before anything is written.

pub mod error;
pub mod models;
pub mod resolver;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{
    Catalog, CatalogEntry, ChoiceOption, EnumValuesResponse, ModelRecord, NewModel,
    ResolvedClassifications,
};
pub use resolver::ClassificationResolver;
pub use traits::{
    CatalogRepository, ModelRepository, ModelRequest, ModelSearch, SearchModelsRequest,
};
