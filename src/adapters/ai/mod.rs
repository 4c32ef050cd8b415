//! LLM collaborator adapters.

mod mock;
mod openai;

pub use mock::{MockAiProvider, MockError};
pub use openai::{OpenAiConfig, OpenAiProvider};
