//! Shared test helpers for license tests.

#![allow(dead_code)]

use epitrove_license::{LicenseManager, LicensingConfig, Product, ProductConfig, ProductRegistry};
use epitrove_store::MemoryStore;
use std::sync::Arc;

/// Plugin product config with sensible defaults.
pub fn plugin_config(slug: &str) -> ProductConfig {
    ProductConfig {
        product_slug: slug.to_string(),
        product_id: 42,
        product_version: "1.0.0".to_string(),
        product_name: "Quiz Addon".to_string(),
        product_renew_link: Some("https://epitrove-uat.wisdmlabs.net/renew".to_string()),
        author_name: Some("WisdmLabs".to_string()),
        is_theme: false,
        wp_override: true,
        plugin_basename: Some(format!("{slug}/{slug}.php")),
    }
}

/// Theme product config with sensible defaults.
pub fn theme_config(slug: &str) -> ProductConfig {
    ProductConfig {
        product_slug: slug.to_string(),
        product_id: 77,
        product_version: "2.1.0".to_string(),
        product_name: "Storefront Theme".to_string(),
        product_renew_link: None,
        author_name: None,
        is_theme: true,
        wp_override: true,
        plugin_basename: None,
    }
}

/// Builds a validated plugin product.
pub fn plugin_product(slug: &str) -> Product {
    Product::from_config(plugin_config(slug)).unwrap()
}

/// Builds a validated theme product.
pub fn theme_product(slug: &str) -> Product {
    Product::from_config(theme_config(slug)).unwrap()
}

/// Licensing config pointed at a test server.
pub fn test_config(api_base_url: &str) -> LicensingConfig {
    LicensingConfig {
        api_base_url: api_base_url.trim_end_matches('/').to_string(),
        site_url: "https://shop.example.com".to_string(),
        timeout_secs: 5,
        ..Default::default()
    }
}

/// Manager over a fresh in-memory store, pointed at a test server, with the
/// registered email already saved.
pub fn manager_with_email(api_base_url: &str) -> (LicenseManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let manager = LicenseManager::new(test_config(api_base_url), store.clone());
    manager
        .save_registered_email("owner@example.com")
        .expect("save email");
    (manager, store)
}

/// Manager over a fresh in-memory store with no registered email.
pub fn manager_without_email(api_base_url: &str) -> (LicenseManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let manager = LicenseManager::new(test_config(api_base_url), store.clone());
    (manager, store)
}

/// Registry with one plugin and one theme.
pub fn two_product_registry() -> ProductRegistry {
    ProductRegistry::from_configs(vec![plugin_config("quiz-addon"), theme_config("storefront")])
        .unwrap()
}
