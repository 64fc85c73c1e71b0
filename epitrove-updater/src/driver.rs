//! The lifecycle driver tying registry, manager, and checker together.

use crate::checker::UpdateChecker;
use crate::error::UpdateResult;
use crate::transient::UpdateTransient;
use epitrove_license::{
    LicenseActionOutcome, LicenseError, LicenseManager, LicenseResult, LicenseSummary,
    LicensingConfig, Product, ProductRegistry,
};
use epitrove_store::KeyValueStore;
use epitrove_types::{Clock, SystemClock};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the licensing lifecycle for one installation.
///
/// The host calls in at two points: its periodic update-check event
/// ([`Self::run_update_checks`]) and the operator's license form
/// ([`Self::activate`] / [`Self::deactivate`] /
/// [`Self::save_registered_email`]). Everything else is internal wiring.
pub struct LicensingDriver {
    registry: ProductRegistry,
    manager: Arc<LicenseManager>,
    checker: UpdateChecker,
}

impl LicensingDriver {
    /// Builds a driver over the system clock.
    #[must_use]
    pub fn new(
        config: LicensingConfig,
        registry: ProductRegistry,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self::with_clock(config, registry, store, Arc::new(SystemClock))
    }

    /// Builds a driver with an injected clock (tests pin cache expiry
    /// through this).
    #[must_use]
    pub fn with_clock(
        config: LicensingConfig,
        registry: ProductRegistry,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let manager = Arc::new(LicenseManager::new(config, store));
        let checker = UpdateChecker::new(manager.clone(), clock);
        Self {
            registry,
            manager,
            checker,
        }
    }

    /// Returns the product registry.
    #[must_use]
    pub fn registry(&self) -> &ProductRegistry {
        &self.registry
    }

    /// Returns the license manager.
    #[must_use]
    pub fn manager(&self) -> &LicenseManager {
        &self.manager
    }

    /// Returns the update checker.
    #[must_use]
    pub fn checker(&self) -> &UpdateChecker {
        &self.checker
    }

    // ── Host update-check event ──────────────────────────────────

    /// Runs an update check for every registered product with an active
    /// license, merging results into the transient. Skips everything when
    /// no registered email is stored.
    ///
    /// Returns how many products had an update surfaced.
    pub async fn run_update_checks(
        &self,
        transient: &mut UpdateTransient,
        forced: bool,
    ) -> UpdateResult<usize> {
        if self.registry.is_empty() {
            return Ok(0);
        }

        if self.manager.registered_email()?.is_none() {
            warn!("no registered email found, skipping update checks");
            return Ok(0);
        }

        let mut surfaced = 0;
        for product in self.registry.iter() {
            if !self.manager.is_active(product)? {
                debug!(slug = %product.slug(), "license not active, skipping");
                continue;
            }
            if self
                .checker
                .check_for_update(product, transient, forced)
                .await?
            {
                surfaced += 1;
            }
        }

        Ok(surfaced)
    }

    // ── Operator license form ────────────────────────────────────

    /// Activates a license for the product with the given slug.
    pub async fn activate(&self, slug: &str, license_key: &str) -> LicenseResult<LicenseActionOutcome> {
        let product = self.find_product(slug)?;
        self.manager.activate(product, license_key).await
    }

    /// Deactivates a license for the product with the given slug.
    pub async fn deactivate(
        &self,
        slug: &str,
        license_key: &str,
    ) -> LicenseResult<LicenseActionOutcome> {
        let product = self.find_product(slug)?;
        self.manager.deactivate(product, license_key).await
    }

    /// Validates and saves the operator's registered email.
    pub fn save_registered_email(&self, email: &str) -> LicenseResult<()> {
        self.manager.save_registered_email(email)
    }

    /// Per-product licensing summaries for the operator.
    pub fn license_overview(&self) -> LicenseResult<Vec<LicenseSummary>> {
        self.manager.license_overview(&self.registry)
    }

    /// True if any registered product holds an active license.
    pub fn any_active_license(&self) -> LicenseResult<bool> {
        self.manager.any_active_license(&self.registry)
    }

    fn find_product(&self, slug: &str) -> LicenseResult<&Product> {
        self.registry
            .find_str(slug)
            .ok_or_else(|| LicenseError::InvalidInput(format!("unknown product: {slug}")))
    }
}
