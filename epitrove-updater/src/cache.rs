//! TTL cache over the host store for remote API responses.
//!
//! Entries are serialized as `{"timeout": <epoch secs>, "value": "<json>"}`
//! under a key derived from the product slug, the license key, and the
//! cache purpose. Deriving from the license key means a key rotation
//! invalidates stale cached entitlement data on its own.

use crate::error::UpdateResult;
use epitrove_store::KeyValueStore;
use epitrove_types::{Clock, ProductSlug};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::debug;

/// How long a cached remote response stays usable: 6 hours.
pub const UPDATE_CACHE_TTL_SECS: i64 = 6 * 60 * 60;

/// What a cache entry holds, one slot per product per purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePurpose {
    /// Lightweight version metadata (`updateCheck` endpoint).
    VersionCheck,
    /// Downloadable-update metadata (`updateDownload` endpoint).
    UpdateDownload,
}

impl CachePurpose {
    fn suffix(&self) -> &'static str {
        match self {
            Self::VersionCheck => "version",
            Self::UpdateDownload => "update",
        }
    }
}

/// A stored cache entry: absolute expiry plus the JSON payload as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Expiry as seconds since the Unix epoch. The entry is usable only
    /// while `now < timeout`.
    pub timeout: i64,
    /// The cached response payload, JSON-encoded.
    pub value: String,
}

/// TTL cache for remote responses, stored in the host key-value store.
pub struct UpdateCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl_secs: i64,
}

impl UpdateCache {
    /// Creates a cache with the standard 6-hour TTL.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(store, clock, UPDATE_CACHE_TTL_SECS)
    }

    /// Creates a cache with a custom TTL in seconds.
    #[must_use]
    pub fn with_ttl(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl_secs: i64) -> Self {
        Self {
            store,
            clock,
            ttl_secs,
        }
    }

    /// Derives the store key for a product/license/purpose combination:
    /// lowercase hex SHA-256 of `<slug><licenseKey>_<suffix>`.
    #[must_use]
    pub fn cache_key(slug: &ProductSlug, license_key: &str, purpose: CachePurpose) -> String {
        let mut hasher = Sha256::new();
        hasher.update(slug.as_str().as_bytes());
        hasher.update(license_key.as_bytes());
        hasher.update(b"_");
        hasher.update(purpose.suffix().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Reads the cached payload, or `None` when the entry is absent,
    /// expired, or unreadable.
    pub fn read(
        &self,
        slug: &ProductSlug,
        license_key: &str,
        purpose: CachePurpose,
    ) -> UpdateResult<Option<serde_json::Value>> {
        let key = Self::cache_key(slug, license_key, purpose);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(None);
        };

        let Ok(entry) = serde_json::from_str::<CacheEntry>(&raw) else {
            debug!(%slug, "discarding unreadable cache entry");
            return Ok(None);
        };

        if self.clock.now_secs() >= entry.timeout {
            debug!(%slug, "cache entry expired");
            return Ok(None);
        }

        match serde_json::from_str(&entry.value) {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                debug!(%slug, "discarding cache entry with unreadable payload");
                Ok(None)
            }
        }
    }

    /// Stores a payload with a fresh TTL, replacing any prior entry.
    pub fn write(
        &self,
        slug: &ProductSlug,
        license_key: &str,
        purpose: CachePurpose,
        value: &serde_json::Value,
    ) -> UpdateResult<()> {
        let key = Self::cache_key(slug, license_key, purpose);
        let entry = CacheEntry {
            timeout: self.clock.now_secs() + self.ttl_secs,
            value: serde_json::to_string(value)?,
        };
        self.store.set(&key, &serde_json::to_string(&entry)?)?;
        Ok(())
    }
}
