//! In-Memory Session Store Adapter
//!
//! Holds one in-progress trip record per traveler in a process-wide map.
//! Sessions are never time-expired; they live until completion or
//! cancellation removes them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::TravelerId;
use crate::domain::trip::TripRequest;
use crate::ports::SessionStore;

/// In-memory storage for in-progress trip records.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<TravelerId, TripRequest>>>,
}

impl InMemorySessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, traveler: TravelerId) -> Option<TripRequest> {
        self.sessions.read().await.get(&traveler).cloned()
    }

    async fn put(&self, traveler: TravelerId, request: TripRequest) {
        self.sessions.write().await.insert(traveler, request);
    }

    async fn delete(&self, traveler: TravelerId) -> bool {
        self.sessions.write().await.remove(&traveler).is_some()
    }

    async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
