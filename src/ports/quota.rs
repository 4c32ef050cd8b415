//! Quota Tracker Port - per-traveler turn accounting.
//!
//! Counters are monotonically increasing and capped by a fixed ceiling;
//! only an administrative reset lowers them. Counters outlive sessions:
//! cancelling a trip does not refund turns.

use async_trait::async_trait;

use crate::domain::foundation::TravelerId;

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    /// True iff the counter is still below the ceiling.
    pub may_proceed: bool,
    /// Turns left before the ceiling.
    pub remaining: u32,
}

/// Counts turns consumed per traveler against a fixed ceiling.
///
/// `consume` increments unconditionally: callers must check `remaining`
/// first. The split keeps the check and the charge at the call sites the
/// turn pipeline dictates - a denied turn is never charged.
#[async_trait]
pub trait QuotaTracker: Send + Sync {
    /// Checks the traveler's counter, lazily initializing it to zero.
    async fn remaining(&self, traveler: TravelerId) -> QuotaStatus;

    /// Charges one turn. Does not self-enforce the ceiling.
    async fn consume(&self, traveler: TravelerId);

    /// Administrative reset to zero.
    async fn reset(&self, traveler: TravelerId);

    /// Turns already used by the traveler, for status reporting.
    async fn used(&self, traveler: TravelerId) -> u32;
}
