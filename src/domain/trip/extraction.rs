//! Typed model of the extraction collaborator's response.
//!
//! The collaborator returns loosely-structured JSON; this module is the
//! boundary where it becomes typed data or is rejected wholesale. A payload
//! that fails to parse is treated as malformed and the caller falls back to
//! its deterministic reply - a parsing failure never propagates as an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Field values extracted from a single utterance.
///
/// `None` means "not mentioned in this utterance", not "unknown": merging
/// treats null as absence and keeps whatever the session already holds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractedTripInfo {
    #[serde(default)]
    pub passengers: Option<u32>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget_per_person: Option<Decimal>,
}

/// Full response envelope from the extraction collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionPayload {
    /// Newly extracted field values (each nullable).
    pub extracted_info: ExtractedTripInfo,
    /// Natural-language reply to continue the conversation.
    pub response: String,
    /// Validation problems the collaborator noticed (advisory only).
    #[serde(default)]
    pub validation_issues: Vec<String>,
}

impl ExtractionPayload {
    /// Parses a raw collaborator response, returning `None` when malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
