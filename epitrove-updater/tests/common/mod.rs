//! Shared test helpers for updater tests.

#![allow(dead_code)]

use epitrove_license::{LicenseManager, LicensingConfig, Product, ProductConfig, ProductRegistry};
use epitrove_store::{KeyValueStore, MemoryStore};
use epitrove_types::ManualClock;
use epitrove_updater::UpdateChecker;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const NOW: i64 = 1_700_000_000;

/// Plugin product config with sensible defaults.
pub fn plugin_config(slug: &str) -> ProductConfig {
    ProductConfig {
        product_slug: slug.to_string(),
        product_id: 42,
        product_version: "1.0.0".to_string(),
        product_name: "Quiz Addon".to_string(),
        product_renew_link: None,
        author_name: None,
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

pub fn plugin_product(slug: &str) -> Product {
    Product::from_config(plugin_config(slug)).unwrap()
}

pub fn theme_product(slug: &str) -> Product {
    Product::from_config(theme_config(slug)).unwrap()
}

pub fn test_config(api_base_url: &str) -> LicensingConfig {
    LicensingConfig {
        api_base_url: api_base_url.trim_end_matches('/').to_string(),
        site_url: "https://shop.example.com".to_string(),
        timeout_secs: 5,
        ..Default::default()
    }
}

/// Everything a checker test needs: store, pinned clock, manager with a
/// registered email, and the checker itself.
pub struct CheckerHarness {
    pub store: Arc<MemoryStore>,
    pub clock: ManualClock,
    pub manager: Arc<LicenseManager>,
    pub checker: UpdateChecker,
}

pub fn checker_harness(api_base_url: &str) -> CheckerHarness {
    let store = Arc::new(MemoryStore::new());
    let clock = ManualClock::at(NOW);
    let manager = Arc::new(LicenseManager::new(test_config(api_base_url), store.clone()));
    manager
        .save_registered_email("owner@example.com")
        .expect("save email");
    let checker = UpdateChecker::new(manager.clone(), Arc::new(clock.clone()));
    CheckerHarness {
        store,
        clock,
        manager,
        checker,
    }
}

/// Seeds an activated license directly into the store.
pub fn seed_license(store: &MemoryStore, slug: &str, key: &str, status: &str) {
    store
        .set(&format!("epi_{slug}_license_status"), status)
        .unwrap();
    store.set(&format!("epi_{slug}_license_key"), key).unwrap();
}

/// Mounts an `updateDownload` response advertising the given version.
pub async fn mount_update_download(server: &MockServer, new_version: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/updateDownload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "data": {
                "new_version": new_version,
                "package": format!("https://epitrove-uat.wisdmlabs.net/dl/quiz-addon-{new_version}.zip"),
                "slug": "quiz-addon",
                "url": "https://epitrove-uat.wisdmlabs.net/quiz-addon/changelog"
            }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn two_product_registry() -> ProductRegistry {
    ProductRegistry::from_configs(vec![plugin_config("quiz-addon"), theme_config("storefront")])
        .unwrap()
}
