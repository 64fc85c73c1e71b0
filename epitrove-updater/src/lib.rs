//! Cached update checks for licensed Epitrove products.
//!
//! Per product, the checker queries the remote API for available-update
//! metadata, caches responses in the host store with a fixed time-to-live,
//! and merges "new version available" entries into the host's
//! update-aggregation structure — but only for products holding an active
//! license.
//!
//! The [`LicensingDriver`] at the top owns the whole lifecycle (registry,
//! license manager, checker); the host's update-check event and the
//! operator's license form are its external call sites.

mod cache;
mod checker;
mod driver;
mod error;
mod transient;

pub use cache::{CacheEntry, CachePurpose, UpdateCache, UPDATE_CACHE_TTL_SECS};
pub use checker::UpdateChecker;
pub use driver::LicensingDriver;
pub use error::{UpdateError, UpdateResult};
pub use transient::{UpdateInfo, UpdateTransient};
