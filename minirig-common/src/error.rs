//! Error types for MiniRig
//!
//! Spec parsing, inference, compatibility and power estimation never fail;
//! they fall back to defaults. Errors come only from loading the catalog,
//! reading configuration, the shared build store and budget input.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Shared build store failure
    #[error("Build store error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON
    #[error("Catalog is not valid JSON: {0}")]
    CatalogJson(#[from] serde_json::Error),

    /// Catalog file is JSON but not a catalog document
    #[error("Invalid catalog: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Budget for starter picks must be a positive, finite amount
    #[error("Budget must be a positive number, got {0}")]
    InvalidBudget(f64),
}
