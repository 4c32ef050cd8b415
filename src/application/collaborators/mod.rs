//! External-service wrappers with local failure policies.
//!
//! Each wrapper owns its prompt, its response parsing, and its fallback:
//! no error from the LLM collaborator ever escapes to the orchestrator's
//! callers. The topic filter fails open, the extractor falls back to a
//! deterministic missing-field reply, and the recommender falls back to a
//! fixed message.

mod extractor;
mod recommender;
mod topic_filter;

pub use extractor::{ExtractionOutcome, TripExtractor};
pub use recommender::Recommender;
pub use topic_filter::{TopicFilter, TopicVerdict};
