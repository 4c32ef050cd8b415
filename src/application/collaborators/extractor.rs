//! Slot extractor - incremental extraction and merge of trip parameters.
//!
//! Sends the current partial record and the new utterance to the LLM
//! collaborator in one call, so extraction and validation happen with full
//! context. The merge never lets a null clear a stored field, and a
//! collaborator failure degrades to a deterministic reply listing the fields
//! still missing - the record is returned unmodified in that case.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::warn;

use crate::application::replies;
use crate::domain::trip::{ExtractionPayload, TripRequest};
use crate::ports::{AiProvider, ChatRequest, MessageRole};

/// Result of one extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The merged record: extracted values win, nulls keep stored values.
    pub updated: TripRequest,
    /// Natural-language reply to continue the conversation.
    pub reply: String,
    /// Advisory validation problems, in collaborator order.
    pub warnings: Vec<String>,
}

/// External-service wrapper performing extraction, validation, and merge.
pub struct TripExtractor {
    provider: Arc<dyn AiProvider>,
    budget_ceiling: Decimal,
}

impl TripExtractor {
    pub fn new(provider: Arc<dyn AiProvider>, budget_ceiling: Decimal) -> Self {
        Self {
            provider,
            budget_ceiling,
        }
    }

    /// Extracts trip information from one utterance and merges it into
    /// `current`.
    ///
    /// Never fails: on collaborator error or malformed output the outcome
    /// carries `current` unchanged and a reply enumerating the missing
    /// fields (or a completion acknowledgment when none are missing).
    pub async fn extract(
        &self,
        utterance: &str,
        current: &TripRequest,
        reference_date: NaiveDate,
    ) -> ExtractionOutcome {
        let request = ChatRequest::new()
            .with_message(MessageRole::System, self.system_prompt())
            .with_message(
                MessageRole::User,
                self.user_prompt(utterance, current, reference_date),
            )
            .with_temperature(0.7)
            .with_max_tokens(600);

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "extraction collaborator unavailable, falling back");
                return self.fallback(current);
            }
        };

        match ExtractionPayload::parse(&response.content) {
            Some(payload) => ExtractionOutcome {
                updated: current.merged_with(&payload.extracted_info),
                reply: payload.response,
                warnings: payload.validation_issues,
            },
            None => {
                warn!("malformed extraction response, falling back");
                self.fallback(current)
            }
        }
    }

    /// The deterministic no-collaborator path: record untouched, reply built
    /// locally from what is still missing.
    fn fallback(&self, current: &TripRequest) -> ExtractionOutcome {
        ExtractionOutcome {
            updated: current.clone(),
            reply: replies::fallback_reply(&current.missing_fields()),
            warnings: Vec::new(),
        }
    }

    fn system_prompt(&self) -> String {
        format!(
            "\
You are a professional travel assistant collecting information to plan trips.

IMPORTANT RULES:
1. You ONLY talk about travel and tourism topics
2. If the user asks about other topics, gently redirect them to travel
3. Validate that dates are logical (departure before return, not in the past)
4. Validate that budgets are realistic (greater than 0, below {ceiling} euros)
5. Validate that the passenger count is realistic (1-20 people)
6. Normalize city and country names to their standard form

Your job is to:
1. Extract travel information from the user's message
2. Update the information you already have
3. Generate a natural response to continue the conversation
4. If information is missing, ask naturally for the missing data
5. Validate that the information is coherent and realistic

The information you need to collect:
- passengers: number of passengers (integer between 1-20)
- origin: origin city (string, format: \"City, Country\")
- destination: destination city (string, format: \"City, Country\")
- departure_date: departure date (format YYYY-MM-DD, not in the past)
- return_date: return date (format YYYY-MM-DD, after departure_date)
- budget_per_person: budget per person in euros (decimal between 50-{ceiling})

ALWAYS respond in JSON format with this structure:
{{
    \"extracted_info\": {{
        \"passengers\": null_or_number,
        \"origin\": null_or_string,
        \"destination\": null_or_string,
        \"departure_date\": null_or_string_YYYY-MM-DD,
        \"return_date\": null_or_string_YYYY-MM-DD,
        \"budget_per_person\": null_or_number
    }},
    \"response\": \"natural_reply_to_the_user\",
    \"validation_issues\": [\"list_of_problems_if_any\"]
}}

Keep replies friendly and professional. If all information is complete and
validated, confirm the details and say you will process the request.",
            ceiling = self.budget_ceiling
        )
    }

    fn user_prompt(
        &self,
        utterance: &str,
        current: &TripRequest,
        reference_date: NaiveDate,
    ) -> String {
        fn shown<T: std::fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        }

        format!(
            "\
Current trip information:
- Passengers: {passengers}
- Origin: {origin}
- Destination: {destination}
- Departure date: {departure}
- Return date: {ret}
- Budget per person: {budget} EUR

New user message: \"{utterance}\"

Current date: {today}

Extract any new information from the message, validate that it is coherent,
and generate an appropriate response.",
            passengers = shown(&current.passengers),
            origin = shown(&current.origin),
            destination = shown(&current.destination),
            departure = shown(&current.departure_date),
            ret = shown(&current.return_date),
            budget = shown(&current.budget_per_person),
            utterance = utterance,
            today = reference_date,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};

    fn extractor_with(provider: MockAiProvider) -> TripExtractor {
        TripExtractor::new(Arc::new(provider), Decimal::new(50_000, 0))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    fn partial_request() -> TripRequest {
        TripRequest {
            passengers: Some(2),
            origin: Some("Madrid, Spain".to_string()),
            destination: Some("Paris, France".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_extraction_merges_new_fields() {
        let provider = MockAiProvider::new().with_response(
            r#"{
                "extracted_info": {
                    "departure_date": "2026-08-15",
                    "return_date": "2026-08-22",
                    "budget_per_person": 800
                },
                "response": "All set!",
                "validation_issues": []
            }"#,
        );
        let extractor = extractor_with(provider);

        let outcome = extractor
            .extract("15th to 22nd August, 800 per person", &partial_request(), today())
            .await;

        assert!(outcome.updated.is_complete());
        assert_eq!(outcome.reply, "All set!");
        assert!(outcome.warnings.is_empty());
        // Pre-existing fields survived the merge.
        assert_eq!(outcome.updated.passengers, Some(2));
        assert_eq!(outcome.updated.origin.as_deref(), Some("Madrid, Spain"));
    }

    #[tokio::test]
    async fn test_extraction_surfaces_warnings() {
        let provider = MockAiProvider::new().with_response(
            r#"{
                "extracted_info": {"passengers": 4},
                "response": "Noted, four of you.",
                "validation_issues": ["return date is before departure date"]
            }"#,
        );
        let extractor = extractor_with(provider);

        let outcome = extractor
            .extract("four passengers", &TripRequest::new(), today())
            .await;

        assert_eq!(outcome.updated.passengers, Some(4));
        assert_eq!(
            outcome.warnings,
            vec!["return date is before departure date".to_string()]
        );
    }

    #[tokio::test]
    async fn test_collaborator_error_returns_record_unchanged() {
        let provider = MockAiProvider::new().with_error(MockError::Timeout { timeout_secs: 60 });
        let extractor = extractor_with(provider);
        let current = partial_request();

        let outcome = extractor.extract("anything", &current, today()).await;

        assert_eq!(outcome.updated, current);
        assert!(outcome.warnings.is_empty());
        // The deterministic reply names exactly the missing fields.
        assert!(outcome.reply.contains("departure date"));
        assert!(outcome.reply.contains("return date"));
        assert!(outcome.reply.contains("budget per person"));
        assert!(!outcome.reply.contains("origin city"));
    }

    #[tokio::test]
    async fn test_malformed_response_returns_record_unchanged() {
        let provider = MockAiProvider::new().with_response("I'd love to help but here is prose");
        let extractor = extractor_with(provider);
        let current = partial_request();

        let outcome = extractor.extract("anything", &current, today()).await;

        assert_eq!(outcome.updated, current);
    }

    #[tokio::test]
    async fn test_fallback_acknowledges_complete_record() {
        let provider = MockAiProvider::new().with_error(MockError::Network {
            message: "boom".to_string(),
        });
        let extractor = extractor_with(provider);
        let complete = TripRequest {
            passengers: Some(2),
            origin: Some("Madrid, Spain".to_string()),
            destination: Some("Paris, France".to_string()),
            departure_date: NaiveDate::from_ymd_opt(2026, 8, 15),
            return_date: NaiveDate::from_ymd_opt(2026, 8, 22),
            budget_per_person: Some(Decimal::new(800, 0)),
        };

        let outcome = extractor.extract("anything", &complete, today()).await;

        assert_eq!(outcome.updated, complete);
        assert!(outcome.reply.contains("all the information"));
    }

    #[tokio::test]
    async fn test_prompt_carries_current_record_and_date() {
        let provider = MockAiProvider::new().with_response(
            r#"{"extracted_info": {}, "response": "ok", "validation_issues": []}"#,
        );
        let provider_handle = provider.clone();
        let extractor = extractor_with(provider);

        extractor
            .extract("see you", &partial_request(), today())
            .await;

        let calls = provider_handle.get_calls();
        let user_prompt = &calls[0].messages[1].content;
        assert!(user_prompt.contains("Madrid, Spain"));
        assert!(user_prompt.contains("unknown"));
        assert!(user_prompt.contains("2026-08-01"));
        assert!(user_prompt.contains("see you"));
        // The ceiling is interpolated into the system instruction.
        assert!(calls[0].messages[0].content.contains("50000"));
    }
}
