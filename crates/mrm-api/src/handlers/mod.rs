//! Handler modules for mrm-api.

pub mod models;
