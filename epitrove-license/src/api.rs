//! HTTP client for the remote licensing API.
//!
//! Three logical endpoints live under the configured base URL:
//! `activateLicense`, `deactivateLicense` for license management, and
//! `updateCheck`/`updateDownload` for update metadata. All are JSON POST,
//! one attempt, bounded timeout, no redirect chasing beyond the client
//! default.

use crate::config::LicensingConfig;
use crate::error::{LicenseError, LicenseResult};
use crate::product::Product;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Response code for a successful API action.
pub const API_SUCCESS_CODE: u16 = 200;
/// Terminal validation failure; never mutates stored state.
pub const API_CODE_VALIDATION_FAILED: u16 = 4001;
/// The license is expired on the server.
pub const API_CODE_LICENSE_EXPIRED: u16 = 4003;
/// The activation quota for the license is exhausted.
pub const API_CODE_NO_ACTIVATIONS_LEFT: u16 = 4005;

/// The identity payload sent with every API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    /// Registered email of the operator.
    pub email: String,
    /// License key for the product.
    pub license_key: String,
    /// Numeric catalog id of the product.
    pub product_id: u64,
    /// URL of the site this installation runs on.
    pub platform: String,
    /// Site identity without the URL scheme.
    pub instance: String,
    /// Installed product version.
    pub version: String,
    /// Product slug; only sent for update endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl IdentityPayload {
    /// Builds the payload for a product, key, and email.
    #[must_use]
    pub fn new(
        config: &LicensingConfig,
        product: &Product,
        license_key: &str,
        email: &str,
    ) -> Self {
        Self {
            email: email.to_string(),
            license_key: license_key.to_string(),
            product_id: product.id().get(),
            platform: config.site_url.clone(),
            instance: config.instance(),
            version: product.version().to_string(),
            slug: None,
        }
    }

    /// Adds the product slug, required by the update endpoints.
    #[must_use]
    pub fn with_slug(mut self, product: &Product) -> Self {
        self.slug = Some(product.slug().to_string());
        self
    }
}

/// Status portion of every API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiStatus {
    /// Response code (200 success, 4xxx failures).
    pub code: u16,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

/// Envelope returned by the update endpoints.
#[derive(Debug, Clone, Deserialize)]
struct UpdateEnvelope {
    code: u16,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Client for the remote licensing API.
#[derive(Debug, Clone)]
pub struct LicensingApi {
    config: LicensingConfig,
    client: Client,
}

impl LicensingApi {
    /// Creates a client with the configured timeout.
    #[must_use]
    pub fn new(config: LicensingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &LicensingConfig {
        &self.config
    }

    /// Joins an endpoint name onto the configured base URL.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.api_base_url)
    }

    /// Requests activation of a license. One attempt, no retry.
    pub async fn activate_license(&self, payload: &IdentityPayload) -> LicenseResult<ApiStatus> {
        self.post_status("activateLicense", payload).await
    }

    /// Requests deactivation of a license. One attempt, no retry.
    pub async fn deactivate_license(&self, payload: &IdentityPayload) -> LicenseResult<ApiStatus> {
        self.post_status("deactivateLicense", payload).await
    }

    /// Fetches downloadable-update metadata for a product.
    ///
    /// Returns `Ok(Some(data))` only for a 200 response carrying a `data`
    /// object; any other response code reads as "no update data".
    pub async fn update_download(
        &self,
        payload: &IdentityPayload,
    ) -> LicenseResult<Option<serde_json::Value>> {
        self.post_update("updateDownload", payload).await
    }

    /// Fetches lightweight version metadata for a product.
    pub async fn update_check(
        &self,
        payload: &IdentityPayload,
    ) -> LicenseResult<Option<serde_json::Value>> {
        self.post_update("updateCheck", payload).await
    }

    async fn post_status(
        &self,
        endpoint: &str,
        payload: &IdentityPayload,
    ) -> LicenseResult<ApiStatus> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, product_id = payload.product_id, "licensing API request");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| LicenseError::Transport(format!("{endpoint} request failed: {e}")))?;

        let status: ApiStatus = response
            .json()
            .await
            .map_err(|e| LicenseError::Transport(format!("{endpoint} response malformed: {e}")))?;

        debug!(code = status.code, "licensing API response");
        Ok(status)
    }

    async fn post_update(
        &self,
        endpoint: &str,
        payload: &IdentityPayload,
    ) -> LicenseResult<Option<serde_json::Value>> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, product_id = payload.product_id, "update API request");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| LicenseError::Transport(format!("{endpoint} request failed: {e}")))?;

        let envelope: UpdateEnvelope = response
            .json()
            .await
            .map_err(|e| LicenseError::Transport(format!("{endpoint} response malformed: {e}")))?;

        if envelope.code != API_SUCCESS_CODE {
            debug!(code = envelope.code, "update API reported no data");
            return Ok(None);
        }

        Ok(envelope.data)
    }
}
