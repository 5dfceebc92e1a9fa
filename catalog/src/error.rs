//! Catalog error type.
//!
//! The harness branches on the error kind in a few places (a missing
//! test-in-run skips, a missing case is a hard error), so this is a
//! typed enum rather than an opaque error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested entity does not exist in the catalog.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// The catalog service failed to answer (network, auth, 5xx, ...).
    #[error("catalog backend failure: {0}")]
    Backend(String),

    /// The catalog answered with data this client cannot interpret.
    #[error("malformed catalog response: {0}")]
    Malformed(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
