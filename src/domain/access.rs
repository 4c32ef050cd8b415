//! Authorization gate for caller identities.
//!
//! The allow-list is parsed once at startup from the configured
//! comma-separated string and is immutable for the life of the process.
//! An empty or malformed list denies everyone: the gate fails closed.

use std::collections::BTreeSet;

use crate::domain::foundation::TravelerId;

/// Decides whether a caller identity may use the assistant at all.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    allowed: BTreeSet<TravelerId>,
}

impl AuthorizationGate {
    /// Builds a gate from a comma-separated allow-list.
    ///
    /// Entries that do not parse as traveler ids invalidate the whole list,
    /// leaving the gate empty. Access control degrades to "deny all", never
    /// to "allow all".
    pub fn from_allow_list(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self {
                allowed: BTreeSet::new(),
            };
        }

        let parsed: Result<BTreeSet<TravelerId>, _> =
            trimmed.split(',').map(|entry| entry.parse()).collect();

        Self {
            allowed: parsed.unwrap_or_default(),
        }
    }

    /// Whether the identity is in the allow-list.
    pub fn is_authorized(&self, traveler: TravelerId) -> bool {
        self.allowed.contains(&traveler)
    }

    /// Ordered list of authorized identities, for administrative reporting.
    pub fn list_authorized(&self) -> Vec<TravelerId> {
        self.allowed.iter().copied().collect()
    }

    /// Number of authorized identities.
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Whether the allow-list is empty (everyone is denied).
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
