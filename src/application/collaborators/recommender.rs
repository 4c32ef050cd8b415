//! Recommendation generator - final handoff for a completed trip record.
//!
//! Also hosts the quick-tips lookup, which shares the provider but has its
//! own failure message chosen by the caller. `recommend` never fails: the
//! session teardown that follows must happen whether or not the collaborator
//! cooperated.

use std::sync::Arc;
use tracing::warn;

use crate::domain::trip::TripRequest;
use crate::ports::{AiError, AiProvider, ChatRequest, MessageRole};

const RECOMMEND_FALLBACK: &str =
    "I could not generate recommendations right now, but your trip looks great!";

/// External-service wrapper producing free-text travel advice.
pub struct Recommender {
    provider: Arc<dyn AiProvider>,
}

impl Recommender {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }

    /// Generates personalized recommendations for a completed record.
    ///
    /// On any collaborator failure this returns a fixed fallback message;
    /// the caller destroys the session either way.
    pub async fn recommend(&self, request: &TripRequest) -> String {
        let chat = ChatRequest::new()
            .with_message(MessageRole::System, self.recommendation_prompt(request))
            .with_temperature(0.8)
            .with_max_tokens(800);

        match self.provider.complete(chat).await {
            Ok(response) if !response.content.is_empty() => response.content,
            Ok(_) => RECOMMEND_FALLBACK.to_string(),
            Err(err) => {
                warn!(error = %err, "recommendation collaborator failed");
                RECOMMEND_FALLBACK.to_string()
            }
        }
    }

    /// Generates quick tips for a destination.
    ///
    /// Unlike `recommend` this surfaces the error so the caller can build a
    /// destination-specific failure reply; the error still never reaches the
    /// end user as such.
    pub async fn quick_tips(&self, destination: &str) -> Result<String, AiError> {
        let chat = ChatRequest::new()
            .with_message(MessageRole::System, self.tips_prompt(destination))
            .with_temperature(0.7)
            .with_max_tokens(400);

        let response = self.provider.complete(chat).await?;
        Ok(response.content)
    }

    fn recommendation_prompt(&self, request: &TripRequest) -> String {
        fn shown<T: std::fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        }

        format!(
            "\
You are a travel expert generating personalized recommendations.

Trip information:
- Destination: {destination}
- Origin: {origin}
- Passengers: {passengers}
- Dates: {departure} to {ret}
- Budget per person: {budget} EUR

Generate useful and specific recommendations about:
1. Best neighborhoods/areas to stay in
2. Must-see activities for those dates
3. Typical dishes to try
4. Practical transport advice
5. Cost estimates (accommodation, food, activities)

Keep the recommendations concise but useful.",
            destination = shown(&request.destination),
            origin = shown(&request.origin),
            passengers = shown(&request.passengers),
            departure = shown(&request.departure_date),
            ret = shown(&request.return_date),
            budget = shown(&request.budget_per_person),
        )
    }

    fn tips_prompt(&self, destination: &str) -> String {
        format!(
            "\
Provide 5-7 quick, useful tips for traveling to {destination}.

Include information about:
- Best time of year to visit
- Currency and tipping
- Public transport
- 2-3 main attractions
- A recommended typical dish
- An important cultural tip

Keep each tip to 1-2 lines at most."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn complete_request() -> TripRequest {
        TripRequest {
            passengers: Some(2),
            origin: Some("Madrid, Spain".to_string()),
            destination: Some("Paris, France".to_string()),
            departure_date: NaiveDate::from_ymd_opt(2026, 8, 15),
            return_date: NaiveDate::from_ymd_opt(2026, 8, 22),
            budget_per_person: Some(Decimal::new(800, 0)),
        }
    }

    #[tokio::test]
    async fn test_recommend_returns_content() {
        let provider = Arc::new(MockAiProvider::new().with_response("Stay in Le Marais."));
        let recommender = Recommender::new(provider);

        let text = recommender.recommend(&complete_request()).await;

        assert_eq!(text, "Stay in Le Marais.");
    }

    #[tokio::test]
    async fn test_recommend_falls_back_on_error() {
        let provider = Arc::new(MockAiProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        }));
        let recommender = Recommender::new(provider);

        let text = recommender.recommend(&complete_request()).await;

        assert_eq!(text, RECOMMEND_FALLBACK);
    }

    #[tokio::test]
    async fn test_recommend_falls_back_on_empty_content() {
        let provider = Arc::new(MockAiProvider::new().with_response(""));
        let recommender = Recommender::new(provider);

        let text = recommender.recommend(&complete_request()).await;

        assert_eq!(text, RECOMMEND_FALLBACK);
    }

    #[tokio::test]
    async fn test_recommend_prompt_carries_trip_details() {
        let provider = MockAiProvider::new().with_response("ok");
        let handle = provider.clone();
        let recommender = Recommender::new(Arc::new(provider));

        recommender.recommend(&complete_request()).await;

        let prompt = &handle.get_calls()[0].messages[0].content;
        assert!(prompt.contains("Paris, France"));
        assert!(prompt.contains("2026-08-15"));
        assert!(prompt.contains("800"));
    }

    #[tokio::test]
    async fn test_quick_tips_returns_content() {
        let provider = Arc::new(MockAiProvider::new().with_response("Visit in spring."));
        let recommender = Recommender::new(provider);

        let tips = recommender.quick_tips("Lisbon").await.unwrap();

        assert_eq!(tips, "Visit in spring.");
    }

    #[tokio::test]
    async fn test_quick_tips_propagates_error_to_caller() {
        let provider = Arc::new(MockAiProvider::new().with_error(MockError::Timeout {
            timeout_secs: 60,
        }));
        let recommender = Recommender::new(provider);

        let result = recommender.quick_tips("Lisbon").await;

        assert!(matches!(result, Err(AiError::Timeout { .. })));
    }
}
