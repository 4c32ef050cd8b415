//! HTTP handlers for the intake endpoints.
//!
//! These handlers connect axum routes to the orchestrator's entry points.
//! The caller identity travels in the path, matching how the chat transport
//! tags every inbound message with its sender.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;

use crate::application::IntakeOrchestrator;
use crate::domain::foundation::TravelerId;

use super::dto::{ErrorResponse, ReplyResponse, TipsRequest, TurnRequest};

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<IntakeOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<IntakeOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Start (or restart) a trip intake session.
///
/// POST /intake/{traveler_id}/start
pub async fn start(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
) -> Json<ReplyResponse> {
    let reply = state.orchestrator.start(TravelerId::new(traveler_id)).await;
    Json(ReplyResponse::new(reply))
}

/// Process one free-text conversation turn.
///
/// POST /intake/{traveler_id}/messages
pub async fn turn(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<ReplyResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.text.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Message cannot be empty")),
        ));
    }

    let reply = state
        .orchestrator
        .turn(TravelerId::new(traveler_id), &req.text)
        .await;
    Ok(Json(ReplyResponse::new(reply)))
}

/// Report trip progress and quota usage.
///
/// GET /intake/{traveler_id}/status
pub async fn status(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
) -> Json<ReplyResponse> {
    let reply = state.orchestrator.status(TravelerId::new(traveler_id)).await;
    Json(ReplyResponse::new(reply))
}

/// Cancel the in-progress trip.
///
/// DELETE /intake/{traveler_id}
pub async fn cancel(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
) -> Json<ReplyResponse> {
    let reply = state.orchestrator.cancel(TravelerId::new(traveler_id)).await;
    Json(ReplyResponse::new(reply))
}

/// Administrative: reset the caller's turn counter.
///
/// POST /admin/{traveler_id}/reset
pub async fn reset_quota(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
) -> Json<ReplyResponse> {
    let reply = state
        .orchestrator
        .reset_quota(TravelerId::new(traveler_id))
        .await;
    Json(ReplyResponse::new(reply))
}

/// Administrative: system overview.
///
/// GET /admin/{traveler_id}/overview
pub async fn admin_overview(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
) -> Json<ReplyResponse> {
    let reply = state
        .orchestrator
        .admin_overview(TravelerId::new(traveler_id))
        .await;
    Json(ReplyResponse::new(reply))
}

/// Quick tips for a destination.
///
/// POST /intake/{traveler_id}/tips
pub async fn quick_tips(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
    Json(req): Json<TipsRequest>,
) -> Json<ReplyResponse> {
    let reply = state
        .orchestrator
        .quick_tips(TravelerId::new(traveler_id), &req.destination)
        .await;
    Json(ReplyResponse::new(reply))
}

/// Command reference.
///
/// GET /intake/{traveler_id}/help
pub async fn help(
    State(state): State<AppState>,
    Path(traveler_id): Path<i64>,
) -> Json<ReplyResponse> {
    let reply = state.orchestrator.help(TravelerId::new(traveler_id)).await;
    Json(ReplyResponse::new(reply))
}
