//! The update checker: cache-first remote checks per product.

use crate::cache::{CachePurpose, UpdateCache};
use crate::error::UpdateResult;
use crate::transient::{UpdateInfo, UpdateTransient};
use epitrove_license::{LicenseError, LicenseManager, Product};
use epitrove_types::Clock;
use semver::Version;
use std::sync::Arc;
use tracing::{debug, info};

/// Checks one product at a time for an available update.
///
/// Reads license state through the [`LicenseManager`] (never mutates it)
/// and keeps remote responses in an [`UpdateCache`]. Transport failures and
/// malformed payloads degrade to "no update found this cycle".
pub struct UpdateChecker {
    manager: Arc<LicenseManager>,
    cache: UpdateCache,
    clock: Arc<dyn Clock>,
}

impl UpdateChecker {
    /// Creates a checker sharing the manager's store and API client.
    #[must_use]
    pub fn new(manager: Arc<LicenseManager>, clock: Arc<dyn Clock>) -> Self {
        let cache = UpdateCache::new(manager.store().clone(), clock.clone());
        Self {
            manager,
            cache,
            clock,
        }
    }

    /// Returns the cache (shared store, same clock).
    #[must_use]
    pub fn cache(&self) -> &UpdateCache {
        &self.cache
    }

    /// Checks for an update and merges it into the transient.
    ///
    /// No-ops (returning `false`) when the product's license is not active,
    /// no license key is stored, the host already has an entry and
    /// `wp_override` is off, or the remote version is not strictly newer.
    /// A forced check skips the cache read but still refreshes the entry.
    ///
    /// Returns `true` when an update entry was surfaced.
    pub async fn check_for_update(
        &self,
        product: &Product,
        transient: &mut UpdateTransient,
        forced: bool,
    ) -> UpdateResult<bool> {
        if !self.manager.is_active(product)? {
            return Ok(false);
        }

        let identifier = product.host_identifier();

        // The host's own update source may have filled this slot already.
        if transient.has_update(identifier) {
            if !product.wp_override() {
                debug!(slug = %product.slug(), "host update entry kept");
                return Ok(false);
            }
            transient.remove(identifier);
        }

        let Some(license_key) = self.manager.license_key(product)? else {
            debug!(slug = %product.slug(), "no license key stored, skipping check");
            return Ok(false);
        };

        let mut details = if forced {
            None
        } else {
            self.cached_update(product, &license_key)?
        };

        if details.is_none() {
            details = self.fetch_update(product, &license_key).await?;
        }

        let Some(details) = details else {
            return Ok(false);
        };

        transient
            .checked
            .insert(identifier.to_string(), product.version().to_string());
        transient.last_checked = Some(self.clock.now_secs());

        let Ok(remote_version) = Version::parse(&details.new_version) else {
            debug!(
                slug = %product.slug(),
                new_version = %details.new_version,
                "remote version not semver, ignoring"
            );
            return Ok(false);
        };

        if remote_version > *product.version() {
            info!(
                slug = %product.slug(),
                installed = %product.version(),
                available = %remote_version,
                "update available"
            );
            transient
                .response
                .insert(identifier.to_string(), details);
            return Ok(true);
        }

        Ok(false)
    }

    /// Fetches lightweight version metadata, cache-first, under the
    /// `version-check` purpose.
    pub async fn remote_version(
        &self,
        product: &Product,
    ) -> UpdateResult<Option<serde_json::Value>> {
        if !self.manager.is_active(product)? {
            return Ok(None);
        }
        let Some(license_key) = self.manager.license_key(product)? else {
            return Ok(None);
        };

        if let Some(cached) =
            self.cache
                .read(product.slug(), &license_key, CachePurpose::VersionCheck)?
        {
            return Ok(Some(cached));
        }

        let payload = match self.manager.api_payload(product, &license_key) {
            Ok(payload) => payload.with_slug(product),
            Err(LicenseError::InvalidInput(reason)) => {
                debug!(slug = %product.slug(), %reason, "skipping version check");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match self.manager.api().update_check(&payload).await {
            Ok(Some(data)) => {
                self.cache.write(
                    product.slug(),
                    &license_key,
                    CachePurpose::VersionCheck,
                    &data,
                )?;
                Ok(Some(data))
            }
            Ok(None) => Ok(None),
            Err(LicenseError::Transport(reason)) => {
                debug!(slug = %product.slug(), %reason, "version check failed");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reads cached update-download data. Entries without a download
    /// package are misses.
    fn cached_update(
        &self,
        product: &Product,
        license_key: &str,
    ) -> UpdateResult<Option<UpdateInfo>> {
        let Some(value) =
            self.cache
                .read(product.slug(), license_key, CachePurpose::UpdateDownload)?
        else {
            return Ok(None);
        };

        let Ok(details) = serde_json::from_value::<UpdateInfo>(value) else {
            return Ok(None);
        };
        if details.package.is_empty() {
            return Ok(None);
        }

        debug!(slug = %product.slug(), "using cached update data");
        Ok(Some(details))
    }

    /// Calls the `updateDownload` endpoint and refreshes the cache.
    /// Transport failures degrade to `None`.
    async fn fetch_update(
        &self,
        product: &Product,
        license_key: &str,
    ) -> UpdateResult<Option<UpdateInfo>> {
        let payload = match self.manager.api_payload(product, license_key) {
            Ok(payload) => payload.with_slug(product),
            Err(LicenseError::InvalidInput(reason)) => {
                debug!(slug = %product.slug(), %reason, "skipping update fetch");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let data = match self.manager.api().update_download(&payload).await {
            Ok(Some(data)) => data,
            Ok(None) => return Ok(None),
            Err(LicenseError::Transport(reason)) => {
                debug!(slug = %product.slug(), %reason, "update fetch failed");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        self.cache.write(
            product.slug(),
            license_key,
            CachePurpose::UpdateDownload,
            &data,
        )?;

        match serde_json::from_value(data) {
            Ok(details) => Ok(Some(details)),
            Err(e) => {
                debug!(slug = %product.slug(), error = %e, "update payload unreadable");
                Ok(None)
            }
        }
    }
}
