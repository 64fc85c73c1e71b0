//! The license-status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The current status of a product's license, as persisted in the host
/// store under `epi_<slug>_license_status`.
///
/// Transitions happen only in response to API calls made by the
/// [`crate::LicenseManager`]:
///
/// - `Unset → Valid` on a successful activation (code 200)
/// - `→ Deactivated` on a successful deactivation (code 200) or any
///   unrecognized server code
/// - `→ Expired` when the server reports code 4003
/// - `→ NoActivationsLeft` when the server reports code 4005
///
/// Code 4001 (terminal validation failure) never mutates the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    /// No status stored yet; the product has never been activated.
    Unset,
    /// License activated and in good standing.
    Valid,
    /// License expired on the server. Still counts as active for update
    /// eligibility until re-validated.
    Expired,
    /// License deactivated, either by the operator or by a server failure.
    Deactivated,
    /// The server reported the activation quota as exhausted.
    NoActivationsLeft,
}

impl LicenseStatus {
    /// True iff the license counts as active for update eligibility.
    ///
    /// `Expired` deliberately counts: expired licenses keep receiving
    /// already-entitled updates until re-validated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Valid | Self::Expired)
    }

    /// Human-readable label for operator-facing summaries.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "Active",
            Self::Expired => "Expired",
            _ => "Not Active",
        }
    }

    /// The string persisted in the store, or `None` for [`Self::Unset`]
    /// (which is represented by key absence).
    #[must_use]
    pub fn as_store_value(&self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Valid => Some("valid"),
            Self::Expired => Some("expired"),
            Self::Deactivated => Some("deactivated"),
            Self::NoActivationsLeft => Some("no_activations_left"),
        }
    }

    /// Parses a stored status string. Absent keys and unrecognized values
    /// both read as [`Self::Unset`].
    #[must_use]
    pub fn from_store_value(value: Option<&str>) -> Self {
        match value {
            Some("valid") => Self::Valid,
            Some("expired") => Self::Expired,
            Some("deactivated") => Self::Deactivated,
            Some("no_activations_left") => Self::NoActivationsLeft,
            _ => Self::Unset,
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_store_value().unwrap_or("unset"))
    }
}
