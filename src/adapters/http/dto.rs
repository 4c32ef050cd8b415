//! HTTP DTOs for the intake endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A free-text conversation turn.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    pub text: String,
}

/// A quick-tips lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct TipsRequest {
    pub destination: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Every entry point returns reply text for the transport to deliver.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

impl ReplyResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Standard error response for malformed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}
