//! In-memory quota tracker implementation.
//!
//! Plain monotonic counters against a fixed ceiling - no time windows.
//! Counters survive session deletion and are only lowered by the
//! administrative reset. Entries are never pruned; the map grows with the
//! set of travelers seen, which is bounded by the allow-list in practice.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::TravelerId;
use crate::ports::{QuotaStatus, QuotaTracker};

/// In-memory turn counter keyed by traveler.
#[derive(Debug, Clone)]
pub struct InMemoryQuotaTracker {
    ceiling: u32,
    counters: Arc<RwLock<HashMap<TravelerId, u32>>>,
}

impl InMemoryQuotaTracker {
    /// Create a tracker with the given per-traveler ceiling.
    pub fn new(ceiling: u32) -> Self {
        Self {
            ceiling,
            counters: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The configured ceiling.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }
}

#[async_trait]
impl QuotaTracker for InMemoryQuotaTracker {
    async fn remaining(&self, traveler: TravelerId) -> QuotaStatus {
        let mut counters = self.counters.write().await;
        let used = *counters.entry(traveler).or_insert(0);

        QuotaStatus {
            may_proceed: used < self.ceiling,
            remaining: self.ceiling.saturating_sub(used),
        }
    }

    async fn consume(&self, traveler: TravelerId) {
        let mut counters = self.counters.write().await;
        *counters.entry(traveler).or_insert(0) += 1;
    }

    async fn reset(&self, traveler: TravelerId) {
        let mut counters = self.counters.write().await;
        counters.insert(traveler, 0);
    }

    async fn used(&self, traveler: TravelerId) -> u32 {
        self.counters
            .read()
            .await
            .get(&traveler)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traveler(n: i64) -> TravelerId {
        TravelerId::new(n)
    }

    #[tokio::test]
    async fn test_unseen_traveler_has_full_quota() {
        let tracker = InMemoryQuotaTracker::new(15);

        let status = tracker.remaining(traveler(1)).await;

        assert!(status.may_proceed);
        assert_eq!(status.remaining, 15);
    }

    #[tokio::test]
    async fn test_consume_decrements_remaining() {
        let tracker = InMemoryQuotaTracker::new(15);

        tracker.consume(traveler(1)).await;
        tracker.consume(traveler(1)).await;

        let status = tracker.remaining(traveler(1)).await;
        assert!(status.may_proceed);
        assert_eq!(status.remaining, 13);
        assert_eq!(tracker.used(traveler(1)).await, 2);
    }

    #[tokio::test]
    async fn test_ceiling_blocks_further_turns() {
        let tracker = InMemoryQuotaTracker::new(3);

        for _ in 0..3 {
            tracker.consume(traveler(1)).await;
        }

        let status = tracker.remaining(traveler(1)).await;
        assert!(!status.may_proceed);
        assert_eq!(status.remaining, 0);
    }

    #[tokio::test]
    async fn test_consume_does_not_self_enforce() {
        // The ceiling check belongs to the caller; consume just counts.
        let tracker = InMemoryQuotaTracker::new(1);

        tracker.consume(traveler(1)).await;
        tracker.consume(traveler(1)).await;

        assert_eq!(tracker.used(traveler(1)).await, 2);
    }

    #[tokio::test]
    async fn test_reset_restores_full_quota() {
        let tracker = InMemoryQuotaTracker::new(5);
        for _ in 0..5 {
            tracker.consume(traveler(1)).await;
        }
        assert!(!tracker.remaining(traveler(1)).await.may_proceed);

        tracker.reset(traveler(1)).await;

        let status = tracker.remaining(traveler(1)).await;
        assert!(status.may_proceed);
        assert_eq!(status.remaining, 5);
        assert_eq!(tracker.used(traveler(1)).await, 0);
    }

    #[tokio::test]
    async fn test_travelers_count_independently() {
        let tracker = InMemoryQuotaTracker::new(2);

        tracker.consume(traveler(1)).await;
        tracker.consume(traveler(1)).await;

        assert!(!tracker.remaining(traveler(1)).await.may_proceed);
        assert!(tracker.remaining(traveler(2)).await.may_proceed);
    }
}
