//! Session Store Port - keyed storage for in-progress trip records.
//!
//! One record per traveler, created on session start and removed on
//! completion or cancellation. The trait exists so concurrency control or
//! persistence can be layered in behind the orchestrator without touching it.

use async_trait::async_trait;

use crate::domain::foundation::TravelerId;
use crate::domain::trip::TripRequest;

/// Keyed store holding the single in-progress trip record per traveler.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the traveler's in-progress record, if a session exists.
    async fn get(&self, traveler: TravelerId) -> Option<TripRequest>;

    /// Creates or replaces the traveler's record.
    async fn put(&self, traveler: TravelerId, request: TripRequest);

    /// Removes the traveler's session. Returns true if one existed.
    async fn delete(&self, traveler: TravelerId) -> bool;

    /// Number of travelers with an active session, for administrative
    /// reporting.
    async fn active_count(&self) -> usize;
}
