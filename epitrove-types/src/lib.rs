//! Core type definitions for the Epitrove client.
//!
//! This crate defines the fundamental, component-agnostic types used by the
//! licensing and update-check crates:
//! - Product identifiers (slug + numeric catalog id)
//! - The clock abstraction used for cache-expiry decisions
//!
//! Domain logic (license state, update metadata) belongs in the
//! `epitrove-license` and `epitrove-updater` crates, not here.

mod clock;
mod ids;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::{ProductId, ProductSlug};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur constructing core types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid product slug: {0}")]
    InvalidSlug(String),

    #[error("invalid product id: {0}")]
    InvalidProductId(String),
}
