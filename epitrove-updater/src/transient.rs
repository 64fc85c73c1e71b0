//! The host's update-aggregation structure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Update metadata for one product, as delivered by the remote API.
///
/// Only the fields the checker inspects are typed; everything else the
/// server sends rides along in `extra` and is preserved verbatim for the
/// host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// The version available remotely.
    #[serde(default)]
    pub new_version: String,
    /// Download URL for the update archive.
    #[serde(default)]
    pub package: String,
    /// Product slug, when the server echoes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Informational URL (changelog, product page).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Any further fields from the server, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The host's update-check data structure.
///
/// `response` is keyed by each product's host identifier (plugin basename,
/// or theme slug); the host reads it to decide which products to offer
/// updates for. `checked` and `last_checked` are bookkeeping the host
/// maintains for all products it looked at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransient {
    /// Available updates by host identifier.
    #[serde(default)]
    pub response: HashMap<String, UpdateInfo>,
    /// Installed version by host identifier, for products that were
    /// checked this cycle.
    #[serde(default)]
    pub checked: HashMap<String, String>,
    /// When the last check ran, as seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<i64>,
}

impl UpdateTransient {
    /// Creates an empty transient.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if an update entry exists for the identifier.
    #[must_use]
    pub fn has_update(&self, host_identifier: &str) -> bool {
        self.response.contains_key(host_identifier)
    }

    /// Returns the update entry for the identifier, if any.
    #[must_use]
    pub fn get(&self, host_identifier: &str) -> Option<&UpdateInfo> {
        self.response.get(host_identifier)
    }

    /// Removes and returns the update entry for the identifier.
    pub fn remove(&mut self, host_identifier: &str) -> Option<UpdateInfo> {
        self.response.remove(host_identifier)
    }
}
