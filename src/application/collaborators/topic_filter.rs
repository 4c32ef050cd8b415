//! Topic filter - keeps the conversation on travel planning.
//!
//! Delegates to the LLM collaborator with a fixed topic policy. Failure
//! policy: fail OPEN. A transient collaborator error must never block a
//! legitimate conversation, so any error or malformed response is treated
//! as in-domain with an empty reason - availability over precision.

use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::ports::{AiProvider, ChatRequest, MessageRole};

const TOPIC_POLICY: &str = "\
Your job is to determine whether a message is related to travel or trip planning.

ALLOWED topics (travel-related):
- Destinations, cities, countries
- Travel dates, trip duration
- Number of passengers, companions
- Budgets, travel costs
- Transport (plane, train, car)
- Accommodation (hotels, apartments)
- Tourist activities
- Travel documentation (passport, visa)
- Corrections or changes to trip information

NOT ALLOWED topics:
- Politics, religion, ideologies
- Sexual or inappropriate content
- Violence or harmful content
- Complex medical topics
- Finance unrelated to travel
- Technology unrelated to travel
- General conversation unrelated to travel

Respond ONLY in JSON format:
{
    \"is_travel_related\": true_or_false,
    \"reason\": \"brief_explanation_if_not_related\"
}";

/// Classification result for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicVerdict {
    /// Whether the utterance is about travel planning.
    pub is_travel_related: bool,
    /// Human-readable reason when rejected; empty otherwise.
    pub reason: String,
}

impl TopicVerdict {
    /// The fail-open verdict used when the collaborator cannot be trusted.
    fn allow() -> Self {
        Self {
            is_travel_related: true,
            reason: String::new(),
        }
    }
}

/// Wire format of the classification collaborator's response.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    #[serde(default = "default_true")]
    is_travel_related: bool,
    #[serde(default)]
    reason: String,
}

fn default_true() -> bool {
    true
}

/// External-service wrapper labelling utterances as in-domain or not.
pub struct TopicFilter {
    provider: Arc<dyn AiProvider>,
}

impl TopicFilter {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Classifies one utterance against the topic policy.
    pub async fn classify(&self, utterance: &str) -> TopicVerdict {
        let request = ChatRequest::new()
            .with_message(MessageRole::System, TOPIC_POLICY)
            .with_message(MessageRole::User, format!("User message: '{}'", utterance))
            .with_temperature(0.3)
            .with_max_tokens(150);

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "topic classifier unavailable, failing open");
                return TopicVerdict::allow();
            }
        };

        match serde_json::from_str::<RawVerdict>(&response.content) {
            Ok(raw) => TopicVerdict {
                is_travel_related: raw.is_travel_related,
                reason: raw.reason,
            },
            Err(err) => {
                warn!(error = %err, "malformed classifier response, failing open");
                TopicVerdict::allow()
            }
        }
    }
}
