//! Error types for the updater crate.

use thiserror::Error;

/// Result type for update operations.
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Errors that can occur during update checks.
///
/// Transport failures never appear here: the checker swallows them and
/// reports "no update data this cycle" instead.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Host store failure.
    #[error("store error: {0}")]
    Store(#[from] epitrove_store::StoreError),

    /// Licensing-layer failure.
    #[error(transparent)]
    License(#[from] epitrove_license::LicenseError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
