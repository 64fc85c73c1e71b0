//! Host key-value store contract for the Epitrove client.
//!
//! Licensing state (keys, statuses, registered email) and update caches all
//! live in a flat string key-value namespace owned by the host. This crate
//! defines that contract as [`KeyValueStore`] and ships two backends:
//!
//! - [`MemoryStore`] — process-local, used in tests and embedding hosts
//!   that persist elsewhere
//! - [`JsonFileStore`] — a single JSON document on disk, for standalone use
//!
//! Reads and writes are individually atomic per backend, but there is no
//! cross-key transaction: callers doing read-then-write can interleave.

mod error;
mod file;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// A flat string-to-string durable store, the shape of the host's options
/// table.
///
/// Absent keys read as `None`; setting a key overwrites any prior value.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any existing value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key` if present.
    fn delete(&self, key: &str) -> StoreResult<()>;
}
