//! Route definitions for the intake endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{
    admin_overview, cancel, help, quick_tips, reset_quota, start, status, turn, AppState,
};

/// Create the intake router with all endpoints.
///
/// # Endpoints
///
/// - `POST /intake/{traveler_id}/start` - Start (or restart) a session
/// - `POST /intake/{traveler_id}/messages` - Free-text conversation turn
/// - `GET /intake/{traveler_id}/status` - Trip progress and quota usage
/// - `DELETE /intake/{traveler_id}` - Cancel the in-progress trip
/// - `POST /intake/{traveler_id}/tips` - Quick tips for a destination
/// - `GET /intake/{traveler_id}/help` - Command reference
/// - `POST /admin/{traveler_id}/reset` - Reset the turn counter
/// - `GET /admin/{traveler_id}/overview` - System overview
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/intake/:traveler_id/start", post(start))
        .route("/intake/:traveler_id/messages", post(turn))
        .route("/intake/:traveler_id/status", get(status))
        .route("/intake/:traveler_id", delete(cancel))
        .route("/intake/:traveler_id/tips", post(quick_tips))
        .route("/intake/:traveler_id/help", get(help))
        .route("/admin/:traveler_id/reset", post(reset_quota))
        .route("/admin/:traveler_id/overview", get(admin_overview))
}
