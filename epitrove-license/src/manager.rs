//! The license manager: activation, deactivation, and status queries.

use crate::api::{
    ApiStatus, IdentityPayload, LicensingApi, API_CODE_LICENSE_EXPIRED,
    API_CODE_NO_ACTIVATIONS_LEFT, API_CODE_VALIDATION_FAILED, API_SUCCESS_CODE,
};
use crate::config::LicensingConfig;
use crate::error::{LicenseError, LicenseResult};
use crate::product::Product;
use crate::registry::ProductRegistry;
use crate::status::LicenseStatus;
use epitrove_store::KeyValueStore;
use epitrove_types::ProductSlug;
use std::sync::Arc;
use tracing::{info, warn};

/// Store option name holding the operator's registered email.
pub const REGISTERED_EMAIL_KEY: &str = "epi_registered_email";

/// The result of an activation or deactivation attempt that reached the
/// server and was mapped to a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseActionOutcome {
    /// Response code from the licensing API.
    pub code: u16,
    /// Message from the licensing API, shown to the operator.
    pub message: String,
    /// The license status persisted as a result.
    pub status: LicenseStatus,
}

/// Per-product licensing summary for operator-facing listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseSummary {
    /// Product slug.
    pub slug: ProductSlug,
    /// Product display name.
    pub name: String,
    /// Stored license key, if any.
    pub license_key: Option<String>,
    /// Stored license status.
    pub status: LicenseStatus,
    /// Human-readable status label.
    pub status_label: &'static str,
}

enum LicenseOperation {
    Activate,
    Deactivate,
}

/// Owns license state transitions for all products.
///
/// Reads and writes license keys and statuses in the host store and is the
/// only component that mutates them; the update checker reads them through
/// this type.
pub struct LicenseManager {
    store: Arc<dyn KeyValueStore>,
    api: LicensingApi,
}

impl LicenseManager {
    /// Creates a manager over the given store and API configuration.
    #[must_use]
    pub fn new(config: LicensingConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            api: LicensingApi::new(config),
        }
    }

    /// Returns the API client (shared with the update checker).
    #[must_use]
    pub fn api(&self) -> &LicensingApi {
        &self.api
    }

    /// Returns the underlying store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    // ── Registered email ─────────────────────────────────────────

    /// Returns the registered email, if one has been saved.
    pub fn registered_email(&self) -> LicenseResult<Option<String>> {
        Ok(self
            .store
            .get(REGISTERED_EMAIL_KEY)?
            .filter(|e| !e.is_empty()))
    }

    /// Validates and saves the registered email.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if the email is empty or
    /// structurally invalid.
    pub fn save_registered_email(&self, email: &str) -> LicenseResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LicenseError::InvalidInput(
                "please enter an email address".to_string(),
            ));
        }
        if !is_structurally_valid_email(email) {
            return Err(LicenseError::InvalidInput(format!(
                "incorrect email format: {email}"
            )));
        }

        self.store.set(REGISTERED_EMAIL_KEY, email)?;
        info!(email, "registered email saved");
        Ok(())
    }

    // ── Per-product license state ────────────────────────────────

    /// Returns the stored license key for a product.
    pub fn license_key(&self, product: &Product) -> LicenseResult<Option<String>> {
        Ok(self
            .store
            .get(&product.license_key_field())?
            .filter(|k| !k.is_empty()))
    }

    /// Returns the stored license status for a product.
    pub fn license_status(&self, product: &Product) -> LicenseResult<LicenseStatus> {
        let raw = self.store.get(&product.license_status_field())?;
        Ok(LicenseStatus::from_store_value(raw.as_deref()))
    }

    /// True iff the product's license counts as active (valid or expired).
    pub fn is_active(&self, product: &Product) -> LicenseResult<bool> {
        Ok(self.license_status(product)?.is_active())
    }

    /// Builds the API identity payload for a product, using the stored
    /// registered email.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidInput`] if no registered email is
    /// stored.
    pub fn api_payload(
        &self,
        product: &Product,
        license_key: &str,
    ) -> LicenseResult<IdentityPayload> {
        let email = self.registered_email()?.ok_or_else(|| {
            LicenseError::InvalidInput("no registered email found".to_string())
        })?;
        Ok(IdentityPayload::new(
            self.api.config(),
            product,
            license_key,
            &email,
        ))
    }

    // ── Activation / deactivation ────────────────────────────────

    /// Activates a license for a product.
    ///
    /// The trimmed key is persisted before the API call, so a transport
    /// failure leaves the key in place with the status untouched.
    pub async fn activate(
        &self,
        product: &Product,
        license_key: &str,
    ) -> LicenseResult<LicenseActionOutcome> {
        let license_key = self.validate_key(license_key)?;
        let payload = self.api_payload(product, &license_key)?;

        self.store
            .set(&product.license_key_field(), &license_key)?;

        let status = self.api.activate_license(&payload).await?;
        self.apply_response(product, LicenseOperation::Activate, status)
    }

    /// Deactivates a license for a product. Does not touch the stored key.
    pub async fn deactivate(
        &self,
        product: &Product,
        license_key: &str,
    ) -> LicenseResult<LicenseActionOutcome> {
        let license_key = self.validate_key(license_key)?;
        let payload = self.api_payload(product, &license_key)?;

        let status = self.api.deactivate_license(&payload).await?;
        self.apply_response(product, LicenseOperation::Deactivate, status)
    }

    fn validate_key(&self, license_key: &str) -> LicenseResult<String> {
        let license_key = license_key.trim();
        if license_key.is_empty() {
            return Err(LicenseError::InvalidInput(
                "incorrect license key or email data".to_string(),
            ));
        }
        Ok(license_key.to_string())
    }

    /// Maps a server response onto a persisted status.
    fn apply_response(
        &self,
        product: &Product,
        operation: LicenseOperation,
        response: ApiStatus,
    ) -> LicenseResult<LicenseActionOutcome> {
        if response.code == API_CODE_VALIDATION_FAILED {
            warn!(
                slug = %product.slug(),
                message = %response.message,
                "license request failed server-side validation"
            );
            return Err(LicenseError::ServerRejected {
                code: response.code,
                message: response.message,
            });
        }

        let status = match response.code {
            API_SUCCESS_CODE => match operation {
                LicenseOperation::Activate => LicenseStatus::Valid,
                LicenseOperation::Deactivate => LicenseStatus::Deactivated,
            },
            API_CODE_LICENSE_EXPIRED => LicenseStatus::Expired,
            API_CODE_NO_ACTIVATIONS_LEFT => LicenseStatus::NoActivationsLeft,
            _ => LicenseStatus::Deactivated,
        };

        self.persist_status(product, status)?;

        Ok(LicenseActionOutcome {
            code: response.code,
            message: response.message,
            status,
        })
    }

    fn persist_status(&self, product: &Product, status: LicenseStatus) -> LicenseResult<()> {
        if let Some(value) = status.as_store_value() {
            // Not transactional: two concurrent admin actions on the same
            // product can interleave on this key.
            self.store.set(&product.license_status_field(), value)?;
            info!(slug = %product.slug(), %status, "license status updated");
        }
        Ok(())
    }

    // ── Registry-wide queries ────────────────────────────────────

    /// True if any registered product holds an active license.
    pub fn any_active_license(&self, registry: &ProductRegistry) -> LicenseResult<bool> {
        for product in registry.iter() {
            if self.is_active(product)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Builds per-product summaries for operator-facing listings.
    pub fn license_overview(
        &self,
        registry: &ProductRegistry,
    ) -> LicenseResult<Vec<LicenseSummary>> {
        let mut rows = Vec::with_capacity(registry.len());
        for product in registry.iter() {
            let status = self.license_status(product)?;
            rows.push(LicenseSummary {
                slug: product.slug().clone(),
                name: product.name().to_string(),
                license_key: self.license_key(product)?,
                status,
                status_label: status.label(),
            });
        }
        Ok(rows)
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
fn is_structurally_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|part| !part.is_empty())
}
