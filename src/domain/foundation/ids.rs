//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Opaque identity of a caller, as assigned by the chat transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelerId(i64);

impl TravelerId {
    /// Creates a TravelerId from a raw transport id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw transport id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TravelerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TravelerId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for TravelerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
