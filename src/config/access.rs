//! Caller access configuration

use serde::Deserialize;

/// Access-control configuration
///
/// Holds the raw comma-separated allow-list as configured. Parsing into
/// traveler identities happens in [`crate::domain::access::AuthorizationGate`],
/// which treats a malformed list as empty (deny all).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Comma-separated traveler ids permitted to use the assistant
    #[serde(default)]
    pub allowed_travelers: String,
}

impl AccessConfig {
    /// Check whether any allow-list entry is configured at all
    pub fn is_configured(&self) -> bool {
        !self.allowed_travelers.trim().is_empty()
    }
}
