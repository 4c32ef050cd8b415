//! Integration tests for the slot-filling intake flow.
//!
//! These tests drive the orchestrator end-to-end with the mock provider and
//! the in-memory adapters, verifying the full turn pipeline:
//! 1. Authorization and quota gates wrap every turn
//! 2. Extraction merges are additive and never clear stored fields
//! 3. Completion triggers recommendation generation exactly once and
//!    destroys the session
//! 4. Collaborator failures degrade to deterministic local replies

use std::sync::Arc;

use tripdesk::adapters::ai::{MockAiProvider, MockError};
use tripdesk::adapters::memory::{InMemoryQuotaTracker, InMemorySessionStore};
use tripdesk::application::IntakeOrchestrator;
use tripdesk::config::LimitsConfig;
use tripdesk::domain::access::AuthorizationGate;
use tripdesk::domain::foundation::TravelerId;
use tripdesk::ports::QuotaTracker;

// =============================================================================
// Test Infrastructure
// =============================================================================

const TRAVELER: i64 = 100;

const ON_TOPIC: &str = r#"{"is_travel_related": true, "reason": ""}"#;

struct Harness {
    orchestrator: IntakeOrchestrator,
    sessions: Arc<InMemorySessionStore>,
    quota: Arc<InMemoryQuotaTracker>,
    provider: MockAiProvider,
}

fn harness(provider: MockAiProvider, ceiling: u32) -> Harness {
    let sessions = Arc::new(InMemorySessionStore::new());
    let quota = Arc::new(InMemoryQuotaTracker::new(ceiling));
    let limits = LimitsConfig {
        turn_quota: ceiling,
        ..Default::default()
    };
    let orchestrator = IntakeOrchestrator::new(
        AuthorizationGate::from_allow_list("100"),
        quota.clone(),
        sessions.clone(),
        Arc::new(provider.clone()),
        &limits,
    );
    Harness {
        orchestrator,
        sessions,
        quota,
        provider,
    }
}

fn traveler() -> TravelerId {
    TravelerId::new(TRAVELER)
}

// =============================================================================
// Scenario: two-turn fill to completion
// =============================================================================

#[tokio::test]
async fn two_turn_fill_completes_and_fires_recommendation_once() {
    let provider = MockAiProvider::new()
        // Turn 1: classifier + extractor
        .with_response(ON_TOPIC)
        .with_response(
            r#"{
                "extracted_info": {
                    "passengers": 2,
                    "origin": "Madrid, Spain",
                    "destination": "Paris, France"
                },
                "response": "When are you traveling, and on what budget?",
                "validation_issues": []
            }"#,
        )
        // Turn 2: classifier + extractor + recommender
        .with_response(ON_TOPIC)
        .with_response(
            r#"{
                "extracted_info": {
                    "departure_date": "2099-08-15",
                    "return_date": "2099-08-22",
                    "budget_per_person": 800
                },
                "response": "Everything is complete!",
                "validation_issues": []
            }"#,
        )
        .with_response("Stay near the river and book the museums early.");
    let h = harness(provider, 15);

    h.orchestrator.start(traveler()).await;

    let first = h
        .orchestrator
        .turn(traveler(), "2 passengers, Madrid to Paris")
        .await;
    assert!(first.contains("When are you traveling"));

    // After turn one the record holds exactly the three extracted fields.
    let record = h.sessions_get(traveler()).await.unwrap();
    assert_eq!(record.passengers, Some(2));
    assert!(record.departure_date.is_none());

    let second = h
        .orchestrator
        .turn(traveler(), "15th to 22nd August, 800 per person")
        .await;

    // The completing reply carries summary and recommendations.
    assert!(second.contains("Your trip summary"));
    assert!(second.contains("Madrid, Spain"));
    assert!(second.contains("Stay near the river"));

    // The session was removed after generation fired exactly once:
    // start + 2 classifier + 2 extractor + 1 recommender = 5 provider calls.
    assert!(h.sessions_get(traveler()).await.is_none());
    assert_eq!(h.provider.call_count(), 5);

    // Quota: start + two turns.
    assert_eq!(h.quota.used(traveler()).await, 3);
}

// Small helper keeping the scenario bodies readable.
impl Harness {
    async fn sessions_get(
        &self,
        traveler: TravelerId,
    ) -> Option<tripdesk::domain::trip::TripRequest> {
        use tripdesk::ports::SessionStore;
        self.sessions.get(traveler).await
    }
}

// =============================================================================
// Scenario: extractor failure leaves the record untouched
// =============================================================================

#[tokio::test]
async fn extractor_failure_replies_with_missing_fields_and_preserves_record() {
    let provider = MockAiProvider::new()
        // Turn 1 succeeds and stores three fields.
        .with_response(ON_TOPIC)
        .with_response(
            r#"{
                "extracted_info": {
                    "passengers": 2,
                    "origin": "Madrid, Spain",
                    "destination": "Paris, France"
                },
                "response": "Got it.",
                "validation_issues": []
            }"#,
        )
        // Turn 2: classifier passes, extractor times out.
        .with_response(ON_TOPIC)
        .with_error(MockError::Timeout { timeout_secs: 60 });
    let h = harness(provider, 15);

    h.orchestrator.start(traveler()).await;
    h.orchestrator
        .turn(traveler(), "2 passengers, Madrid to Paris")
        .await;
    let before = h.sessions_get(traveler()).await.unwrap();

    let reply = h.orchestrator.turn(traveler(), "mid August, around 800").await;

    // The reply enumerates exactly the fields missing from the pre-existing
    // record - the ones turn one did not fill.
    assert!(reply.contains("departure date"));
    assert!(reply.contains("return date"));
    assert!(reply.contains("budget per person"));
    assert!(!reply.contains("origin city"));
    assert!(!reply.contains("destination city"));

    // And the record is unchanged.
    let after = h.sessions_get(traveler()).await.unwrap();
    assert_eq!(after, before);
}

// =============================================================================
// Scenario: quota ceiling
// =============================================================================

#[tokio::test]
async fn sixteenth_turn_is_rejected_and_not_counted() {
    let h = harness(MockAiProvider::new(), 15);

    // Burn the full quota: one start + fourteen idle turns.
    h.orchestrator.start(traveler()).await;
    for _ in 0..14 {
        h.orchestrator.turn(traveler(), "hello").await;
    }
    assert_eq!(h.quota.used(traveler()).await, 15);

    let reply = h.orchestrator.turn(traveler(), "one more").await;

    assert!(reply.contains("Message limit reached"));
    // The counter stays at the ceiling, not one past it.
    assert_eq!(h.quota.used(traveler()).await, 15);
}

// =============================================================================
// Scenario: off-topic turn
// =============================================================================

#[tokio::test]
async fn off_topic_turn_consumes_quota_and_keeps_record() {
    let provider = MockAiProvider::new().with_response(
        r#"{"is_travel_related": false, "reason": "That is a medical question"}"#,
    );
    let h = harness(provider, 15);

    h.orchestrator.start(traveler()).await;
    let before = h.sessions_get(traveler()).await.unwrap();
    let used_before = h.quota.used(traveler()).await;

    let reply = h
        .orchestrator
        .turn(traveler(), "what should I take for a headache?")
        .await;

    assert!(reply.contains("That is a medical question"));
    assert_eq!(h.quota.used(traveler()).await, used_before + 1);
    assert_eq!(h.sessions_get(traveler()).await.unwrap(), before);
}

// =============================================================================
// Scenario: unauthorized caller
// =============================================================================

#[tokio::test]
async fn unauthorized_caller_is_denied_everywhere_without_mutation() {
    let h = harness(MockAiProvider::new(), 15);
    let outsider = TravelerId::new(666);

    let replies = vec![
        h.orchestrator.start(outsider).await,
        h.orchestrator.turn(outsider, "Paris").await,
        h.orchestrator.status(outsider).await,
        h.orchestrator.cancel(outsider).await,
        h.orchestrator.help(outsider).await,
        h.orchestrator.reset_quota(outsider).await,
        h.orchestrator.admin_overview(outsider).await,
        h.orchestrator.quick_tips(outsider, "Paris").await,
    ];

    for reply in replies {
        assert!(
            reply.contains("Access denied") || reply.contains("not authorized"),
            "expected denial, got: {}",
            reply
        );
    }

    // No quota charged, no session created, no collaborator consulted.
    assert_eq!(h.quota.used(outsider).await, 0);
    assert!(h.sessions_get(outsider).await.is_none());
    assert_eq!(h.provider.call_count(), 0);
}

// =============================================================================
// Scenario: cancellation mid-fill
// =============================================================================

#[tokio::test]
async fn cancel_discards_partial_record_but_not_quota() {
    let provider = MockAiProvider::new().with_response(ON_TOPIC).with_response(
        r#"{
            "extracted_info": {"destination": "Rome, Italy"},
            "response": "Rome it is.",
            "validation_issues": []
        }"#,
    );
    let h = harness(provider, 15);

    h.orchestrator.start(traveler()).await;
    h.orchestrator.turn(traveler(), "Rome").await;
    assert!(h.sessions_get(traveler()).await.is_some());

    let reply = h.orchestrator.cancel(traveler()).await;

    assert!(reply.contains("Trip cancelled"));
    assert!(h.sessions_get(traveler()).await.is_none());
    // Quota survives the session.
    assert_eq!(h.quota.used(traveler()).await, 2);

    // A fresh start begins from an empty record.
    h.orchestrator.start(traveler()).await;
    let record = h.sessions_get(traveler()).await.unwrap();
    assert!(record.destination.is_none());
}
