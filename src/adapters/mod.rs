//! Adapters - concrete implementations of the ports.

pub mod ai;
pub mod http;
pub mod memory;

pub use ai::{MockAiProvider, MockError, OpenAiConfig, OpenAiProvider};
pub use memory::{InMemoryQuotaTracker, InMemorySessionStore};
