//! The product registry.

use crate::config::ProductConfig;
use crate::error::{LicenseError, LicenseResult};
use crate::product::Product;
use epitrove_types::ProductSlug;

/// All products known to this installation.
///
/// Built once at startup from the static configuration set and threaded
/// through as an argument wherever the product list is needed; there is no
/// process-global product state.
#[derive(Debug, Clone, Default)]
pub struct ProductRegistry {
    products: Vec<Product>,
}

impl ProductRegistry {
    /// Builds the registry from product configurations, validating each.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or
    /// [`LicenseError::InvalidConfig`] on duplicate slugs.
    pub fn from_configs(configs: Vec<ProductConfig>) -> LicenseResult<Self> {
        let mut products = Vec::with_capacity(configs.len());

        for config in configs {
            let product = Product::from_config(config)?;
            if products
                .iter()
                .any(|p: &Product| p.slug() == product.slug())
            {
                return Err(LicenseError::InvalidConfig(format!(
                    "duplicate product slug: {}",
                    product.slug()
                )));
            }
            products.push(product);
        }

        Ok(Self { products })
    }

    /// Returns the product with the given slug.
    #[must_use]
    pub fn find(&self, slug: &ProductSlug) -> Option<&Product> {
        self.products.iter().find(|p| p.slug() == slug)
    }

    /// Returns the product with the given slug string.
    #[must_use]
    pub fn find_str(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug().as_str() == slug)
    }

    /// Iterates over all products.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Returns the number of registered products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True if no products are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
