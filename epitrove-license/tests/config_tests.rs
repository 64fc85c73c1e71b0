mod common;

use common::{plugin_config, theme_config};
use epitrove_license::{LicensingConfig, Product, ProductConfig};

// ── LicensingConfig ──────────────────────────────────────────────

#[test]
fn licensing_config_defaults() {
    let config = LicensingConfig::default();
    assert_eq!(
        config.api_base_url,
        "https://api.epitrove-uat.wisdmlabs.net/v1"
    );
    assert_eq!(config.website_url, "https://epitrove-uat.wisdmlabs.net");
    assert_eq!(config.timeout_secs, 45);
}

#[test]
fn instance_strips_https_scheme() {
    let config = LicensingConfig {
        site_url: "https://shop.example.com".to_string(),
        ..Default::default()
    };
    assert_eq!(config.instance(), "shop.example.com");
}

#[test]
fn instance_strips_http_scheme() {
    let config = LicensingConfig {
        site_url: "http://shop.example.com/blog".to_string(),
        ..Default::default()
    };
    assert_eq!(config.instance(), "shop.example.com/blog");
}

#[test]
fn instance_passes_through_schemeless() {
    let config = LicensingConfig {
        site_url: "shop.example.com".to_string(),
        ..Default::default()
    };
    assert_eq!(config.instance(), "shop.example.com");
}

#[test]
fn licensing_config_serde_roundtrip() {
    let config = LicensingConfig {
        site_url: "https://shop.example.com".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: LicensingConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.site_url, "https://shop.example.com");
    assert_eq!(parsed.timeout_secs, 45);
}

// ── ProductConfig deserialization ────────────────────────────────

#[test]
fn product_config_from_camel_case_json() {
    let json = r#"{
        "productSlug": "quiz-addon",
        "productId": 42,
        "productVersion": "1.0.0",
        "productName": "Quiz Addon",
        "pluginBasename": "quiz-addon/quiz-addon.php"
    }"#;
    let config: ProductConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.product_slug, "quiz-addon");
    assert_eq!(config.product_id, 42);
    assert!(!config.is_theme);
    assert!(config.wp_override, "wp_override defaults to true");
}

// ── Product validation ───────────────────────────────────────────

#[test]
fn product_from_valid_plugin_config() {
    let product = Product::from_config(plugin_config("quiz-addon")).unwrap();
    assert_eq!(product.slug().as_str(), "quiz-addon");
    assert_eq!(product.id().get(), 42);
    assert_eq!(product.version().to_string(), "1.0.0");
    assert_eq!(product.name(), "Quiz Addon");
    assert!(!product.is_theme());
    assert!(product.wp_override());
    assert_eq!(product.host_identifier(), "quiz-addon/quiz-addon.php");
}

#[test]
fn product_from_valid_theme_config() {
    let product = Product::from_config(theme_config("storefront")).unwrap();
    assert!(product.is_theme());
    assert_eq!(product.host_identifier(), "storefront");
    assert_eq!(product.renew_link(), None);
    assert_eq!(product.author(), None);
}

#[test]
fn product_rejects_bad_slug() {
    let config = ProductConfig {
        product_slug: "Quiz Addon!".to_string(),
        ..plugin_config("quiz-addon")
    };
    assert!(Product::from_config(config).is_err());
}

#[test]
fn product_rejects_zero_id() {
    let config = ProductConfig {
        product_id: 0,
        ..plugin_config("quiz-addon")
    };
    assert!(Product::from_config(config).is_err());
}

#[test]
fn product_rejects_non_semver_version() {
    let config = ProductConfig {
        product_version: "one-point-oh".to_string(),
        ..plugin_config("quiz-addon")
    };
    assert!(Product::from_config(config).is_err());
}

#[test]
fn product_rejects_empty_name() {
    let config = ProductConfig {
        product_name: "   ".to_string(),
        ..plugin_config("quiz-addon")
    };
    assert!(Product::from_config(config).is_err());
}

#[test]
fn plugin_requires_basename() {
    let config = ProductConfig {
        plugin_basename: None,
        ..plugin_config("quiz-addon")
    };
    assert!(Product::from_config(config).is_err());
}

#[test]
fn theme_does_not_require_basename() {
    let config = theme_config("storefront");
    assert!(config.plugin_basename.is_none());
    assert!(Product::from_config(config).is_ok());
}

// ── Store option names ───────────────────────────────────────────

#[test]
fn field_keys_derive_from_slug() {
    let product = Product::from_config(plugin_config("quiz-addon")).unwrap();
    assert_eq!(
        product.license_key_field(),
        "epi_quiz-addon_license_key"
    );
    assert_eq!(
        product.license_status_field(),
        "epi_quiz-addon_license_status"
    );
    assert_eq!(product.field_key("nonce"), "epi_quiz-addon_nonce");
}
