//! Error types for the licensing crate.

use thiserror::Error;

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

/// Errors that can occur in license operations.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Missing or malformed caller input (empty key, bad email). Reported
    /// back to the operator.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Product configuration failed validation at construction time.
    #[error("invalid product configuration: {0}")]
    InvalidConfig(String),

    /// Network failure, timeout, or a response body that is not valid JSON.
    /// The stored license status is left untouched.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server rejected the request with a terminal validation failure
    /// (code 4001). No status mutation takes place.
    #[error("server rejected request (code {code}): {message}")]
    ServerRejected {
        /// Response code from the licensing API.
        code: u16,
        /// Human-readable message from the licensing API.
        message: String,
    },

    /// Host store failure.
    #[error("store error: {0}")]
    Store(#[from] epitrove_store::StoreError),

    /// Identifier validation failure.
    #[error(transparent)]
    Types(#[from] epitrove_types::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
