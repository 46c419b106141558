//! Error types for form-field extraction.
//!
//! Extraction itself never fails a document because of a malformed line;
//! these variants cover the operations that can genuinely fail (reading
//! input, parsing a catalog resource). Heuristic anomalies surface through
//! the `log` crate, not through this type.

use thiserror::Error;

/// Errors that can occur while loading inputs or catalog resources.
#[derive(Error, Debug)]
pub enum FormliftError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog JSON was not valid.
    #[error("catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// Catalog content violated an invariant (duplicate key, empty alias).
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Convenience result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FormliftError>;
