//! Validated product entity.

use crate::config::ProductConfig;
use crate::error::{LicenseError, LicenseResult};
use epitrove_types::{ProductId, ProductSlug};
use semver::Version;

/// A product known to this installation.
///
/// Built once from a validated [`ProductConfig`]; immutable afterwards.
/// License key and status live in the host store, addressed through the
/// option-name helpers below, never on the product itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    slug: ProductSlug,
    id: ProductId,
    version: Version,
    name: String,
    renew_link: Option<String>,
    author: Option<String>,
    is_theme: bool,
    wp_override: bool,
    plugin_basename: Option<String>,
}

impl Product {
    /// Validates a [`ProductConfig`] and builds the product.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidConfig`] (or a slug/id validation
    /// error) if the slug or id is malformed, the version is not semver,
    /// the name is empty, or a plugin is missing its basename.
    pub fn from_config(config: ProductConfig) -> LicenseResult<Self> {
        let slug = ProductSlug::parse(&config.product_slug)?;
        let id = ProductId::new(config.product_id)?;

        let version = Version::parse(&config.product_version).map_err(|e| {
            LicenseError::InvalidConfig(format!(
                "product version {:?} is not semver: {e}",
                config.product_version
            ))
        })?;

        let name = config.product_name.trim().to_string();
        if name.is_empty() {
            return Err(LicenseError::InvalidConfig(
                "product name must not be empty".to_string(),
            ));
        }

        let plugin_basename = config
            .plugin_basename
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        if !config.is_theme && plugin_basename.is_none() {
            return Err(LicenseError::InvalidConfig(format!(
                "plugin product {slug} requires a plugin basename"
            )));
        }

        Ok(Self {
            slug,
            id,
            version,
            name,
            renew_link: config.product_renew_link,
            author: config.author_name,
            is_theme: config.is_theme,
            wp_override: config.wp_override,
            plugin_basename,
        })
    }

    /// Returns the product slug.
    #[must_use]
    pub fn slug(&self) -> &ProductSlug {
        &self.slug
    }

    /// Returns the numeric catalog id.
    #[must_use]
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Returns the installed version.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the renewal link, if configured.
    #[must_use]
    pub fn renew_link(&self) -> Option<&str> {
        self.renew_link.as_deref()
    }

    /// Returns the author, if configured.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// True if the product is a theme.
    #[must_use]
    pub fn is_theme(&self) -> bool {
        self.is_theme
    }

    /// Whether the host's own update source is suppressed for this product.
    #[must_use]
    pub fn wp_override(&self) -> bool {
        self.wp_override
    }

    /// The identifier the host's update-aggregation map keys this product
    /// by: the plugin basename for plugins, the slug for themes.
    #[must_use]
    pub fn host_identifier(&self) -> &str {
        if self.is_theme {
            self.slug.as_str()
        } else {
            // from_config guarantees a basename for plugins
            self.plugin_basename.as_deref().unwrap_or(self.slug.as_str())
        }
    }

    /// Derives the store option name for a per-product field.
    #[must_use]
    pub fn field_key(&self, field: &str) -> String {
        format!("epi_{}_{}", self.slug, field)
    }

    /// Store option name holding this product's license key.
    #[must_use]
    pub fn license_key_field(&self) -> String {
        self.field_key("license_key")
    }

    /// Store option name holding this product's license status.
    #[must_use]
    pub fn license_status_field(&self) -> String {
        self.field_key("license_status")
    }
}
