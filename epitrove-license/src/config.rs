//! Configuration structs for the licensing client.
//!
//! [`LicensingConfig`] carries the installation-wide settings (API base URL,
//! site identity, timeout). [`ProductConfig`] is the static per-product
//! configuration shipped alongside each product; it is plain data and gets
//! validated when turned into a [`crate::Product`].

use serde::{Deserialize, Serialize};

/// Installation-wide licensing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicensingConfig {
    /// Base URL of the licensing API, without a trailing slash.
    pub api_base_url: String,
    /// Public website of the licensing platform (download links live here).
    pub website_url: String,
    /// URL of the site this installation runs on. Sent as `platform` in
    /// API payloads.
    pub site_url: String,
    /// HTTP timeout for API calls, in seconds.
    pub timeout_secs: u64,
}

impl Default for LicensingConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.epitrove-uat.wisdmlabs.net/v1".to_string(),
            website_url: "https://epitrove-uat.wisdmlabs.net".to_string(),
            site_url: String::new(),
            timeout_secs: 45,
        }
    }
}

impl LicensingConfig {
    /// Returns the site identity with the URL scheme stripped. Sent as
    /// `instance` in API payloads.
    #[must_use]
    pub fn instance(&self) -> String {
        self.site_url
            .strip_prefix("https://")
            .or_else(|| self.site_url.strip_prefix("http://"))
            .unwrap_or(&self.site_url)
            .to_string()
    }
}

fn default_wp_override() -> bool {
    true
}

/// Static configuration for one product, as shipped in its config file.
///
/// Every field is explicit and typed; construction of a [`crate::Product`]
/// validates the lot and rejects anything malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfig {
    /// Stable product slug, used to derive store option names.
    pub product_slug: String,
    /// Numeric catalog id assigned by the platform.
    pub product_id: u64,
    /// Currently installed version (semver).
    pub product_version: String,
    /// Display name.
    pub product_name: String,
    /// Link for renewing an expired license.
    #[serde(default)]
    pub product_renew_link: Option<String>,
    /// Product author.
    #[serde(default)]
    pub author_name: Option<String>,
    /// Whether the product is a theme (plugins otherwise).
    #[serde(default)]
    pub is_theme: bool,
    /// Whether to suppress the host's own update source for this product.
    #[serde(default = "default_wp_override")]
    pub wp_override: bool,
    /// Host-recognized plugin identifier (path relative to the host's
    /// plugin directory). Required for plugins, ignored for themes.
    #[serde(default)]
    pub plugin_basename: Option<String>,
}
