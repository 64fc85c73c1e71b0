//! Identifier types for catalog products.
//!
//! A product is addressed two ways: by its slug (the stable string key used
//! to derive store option names) and by its numeric catalog id (what the
//! licensing API expects in request payloads).

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The stable string key for a product.
///
/// Slugs are lowercase ASCII alphanumerics plus `-` and `_`. They appear in
/// store option names (`epi_<slug>_license_key`) and in update API payloads,
/// so the character set is validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSlug(String);

impl ProductSlug {
    /// Parses and validates a slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is empty or contains characters outside
    /// `[a-z0-9_-]`.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidSlug("slug must not be empty".to_string()));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(Error::InvalidSlug(format!(
                "slug may only contain lowercase alphanumerics, '-' and '_': {s}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The numeric catalog id of a product, assigned by the licensing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product id.
    ///
    /// # Errors
    ///
    /// Returns an error for id zero, which the platform never assigns.
    pub fn new(id: u64) -> crate::Result<Self> {
        if id == 0 {
            return Err(Error::InvalidProductId(
                "product id must be nonzero".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
