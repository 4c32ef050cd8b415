//! Intake Orchestrator - the per-turn state machine.
//!
//! Ties the authorization gate, quota tracker, topic filter, extractor, and
//! recommender together for a single turn. Session states: Idle (no record
//! stored) -> Collecting (record stored, incomplete) -> Complete (all six
//! fields present). Completion is handled inside the same turn that produced
//! it: the recommender runs and the session is destroyed before the reply is
//! returned, so no record ever sits complete across turns.
//!
//! Turns for one traveler are serialized by a per-traveler async mutex held
//! across the read-merge-write (including the collaborator round-trips).
//! There is no global lock, so travelers never block each other.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::application::collaborators::{Recommender, TopicFilter, TripExtractor};
use crate::application::replies;
use crate::config::LimitsConfig;
use crate::domain::access::AuthorizationGate;
use crate::domain::foundation::TravelerId;
use crate::domain::trip::TripRequest;
use crate::ports::{AiProvider, QuotaTracker, SessionStore};

/// The slot-filling dialogue orchestrator.
///
/// One instance serves all travelers; every entry point takes the caller
/// identity and returns the reply text for the transport to deliver.
pub struct IntakeOrchestrator {
    gate: AuthorizationGate,
    quota: Arc<dyn QuotaTracker>,
    sessions: Arc<dyn SessionStore>,
    topic_filter: TopicFilter,
    extractor: TripExtractor,
    recommender: Recommender,
    quota_ceiling: u32,
    turn_locks: Mutex<HashMap<TravelerId, Arc<Mutex<()>>>>,
}

impl IntakeOrchestrator {
    pub fn new(
        gate: AuthorizationGate,
        quota: Arc<dyn QuotaTracker>,
        sessions: Arc<dyn SessionStore>,
        provider: Arc<dyn AiProvider>,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            gate,
            quota,
            sessions,
            topic_filter: TopicFilter::new(provider.clone()),
            extractor: TripExtractor::new(provider.clone(), limits.budget_ceiling),
            recommender: Recommender::new(provider),
            quota_ceiling: limits.turn_quota,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Starts (or restarts) a session: Idle -> Collecting.
    ///
    /// Re-starting overwrites any in-progress record for the traveler.
    pub async fn start(&self, traveler: TravelerId) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::access_denied(traveler);
        }

        let lock = self.turn_lock(traveler).await;
        let _guard = lock.lock().await;

        let status = self.quota.remaining(traveler).await;
        if !status.may_proceed {
            return replies::quota_exhausted(self.quota_ceiling);
        }
        self.quota.consume(traveler).await;

        self.sessions.put(traveler, TripRequest::new()).await;
        info!(%traveler, "session started");

        replies::welcome(status.remaining.saturating_sub(1))
    }

    /// Processes one free-text turn.
    ///
    /// Pipeline: authorization -> quota -> topic filter -> extract/merge ->
    /// completion check. Rejections for authorization or quota leave all
    /// state untouched; everything past the quota gate has already been
    /// charged, including off-topic turns and turns with no session (the
    /// original accounting, preserved deliberately).
    pub async fn turn(&self, traveler: TravelerId, utterance: &str) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::access_denied(traveler);
        }

        let lock = self.turn_lock(traveler).await;
        let _guard = lock.lock().await;

        let status = self.quota.remaining(traveler).await;
        if !status.may_proceed {
            info!(%traveler, "turn rejected: quota exhausted");
            return replies::quota_exhausted(self.quota_ceiling);
        }
        self.quota.consume(traveler).await;
        let remaining = status.remaining.saturating_sub(1);

        let Some(current) = self.sessions.get(traveler).await else {
            return replies::no_active_session();
        };

        let utterance = utterance.trim();

        let verdict = self.topic_filter.classify(utterance).await;
        if !verdict.is_travel_related {
            info!(%traveler, reason = %verdict.reason, "turn rejected: off topic");
            return replies::off_topic(&verdict.reason, remaining);
        }

        let today = Utc::now().date_naive();
        let outcome = self.extractor.extract(utterance, &current, today).await;
        self.sessions.put(traveler, outcome.updated.clone()).await;

        let mut reply = replies::with_warnings(&outcome.reply, &outcome.warnings);
        reply.push_str("\n\n");
        reply.push_str(&replies::quota_footer(remaining));

        if outcome.updated.is_complete() {
            info!(%traveler, "record complete, generating recommendations");
            let recommendations = self.recommender.recommend(&outcome.updated).await;
            self.sessions.delete(traveler).await;

            reply.push_str("\n\n");
            reply.push_str(&replies::trip_summary(&outcome.updated));
            reply.push_str("\n\n");
            reply.push_str(&replies::completion(&recommendations));
        }

        reply
    }

    /// Reports the traveler's trip progress and quota usage. Free of charge.
    pub async fn status(&self, traveler: TravelerId) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::access_denied(traveler);
        }

        let request = self.sessions.get(traveler).await;
        let used = self.quota.used(traveler).await;

        replies::status_report(request.as_ref(), used, self.quota_ceiling)
    }

    /// Cancels the in-progress trip, if any. Quota is unaffected.
    pub async fn cancel(&self, traveler: TravelerId) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::access_denied(traveler);
        }

        let lock = self.turn_lock(traveler).await;
        let _guard = lock.lock().await;

        if self.sessions.delete(traveler).await {
            info!(%traveler, "session cancelled");
            replies::cancelled()
        } else {
            replies::nothing_to_cancel()
        }
    }

    /// Administrative: resets the caller's own turn counter.
    pub async fn reset_quota(&self, traveler: TravelerId) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::command_not_authorized();
        }

        self.quota.reset(traveler).await;
        info!(%traveler, "quota reset");
        replies::quota_reset(self.quota_ceiling)
    }

    /// Administrative: authorized travelers, their usage, active sessions.
    pub async fn admin_overview(&self, traveler: TravelerId) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::command_not_authorized();
        }

        let mut users = Vec::new();
        for id in self.gate.list_authorized() {
            users.push((id, self.quota.used(id).await));
        }
        let active_sessions = self.sessions.active_count().await;

        replies::admin_overview(&users, self.quota_ceiling, active_sessions)
    }

    /// Quick tips for a destination. Charged like a turn.
    pub async fn quick_tips(&self, traveler: TravelerId, destination: &str) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::command_not_authorized();
        }

        let lock = self.turn_lock(traveler).await;
        let _guard = lock.lock().await;

        let status = self.quota.remaining(traveler).await;
        if !status.may_proceed {
            return replies::quota_exhausted(self.quota_ceiling);
        }
        self.quota.consume(traveler).await;
        let remaining = status.remaining.saturating_sub(1);

        let destination = destination.trim();
        if destination.is_empty() {
            return replies::tips_usage(remaining);
        }

        match self.recommender.quick_tips(destination).await {
            Ok(content) => replies::tips(destination, &content, remaining),
            Err(err) => {
                warn!(%traveler, error = %err, "quick tips generation failed");
                replies::tips_failed(destination, remaining)
            }
        }
    }

    /// Command reference.
    pub async fn help(&self, traveler: TravelerId) -> String {
        if !self.gate.is_authorized(traveler) {
            return replies::access_denied(traveler);
        }

        replies::help(self.quota_ceiling)
    }

    /// Per-traveler turn lock: at most one in-flight mutation per identity.
    async fn turn_lock(&self, traveler: TravelerId) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        locks
            .entry(traveler)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
