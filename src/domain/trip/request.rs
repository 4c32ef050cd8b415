//! The partial trip record built up across conversation turns.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::extraction::ExtractedTripInfo;

/// The six trip parameters collected during intake.
///
/// Every field is optional: absent means "not yet provided". A present value
/// has passed the extraction collaborator's validation. The record itself
/// does not enforce cross-field ordering (departure before return); the
/// extraction step reports violations as warnings which are surfaced to the
/// traveler rather than silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Number of travelers (1-20)
    pub passengers: Option<u32>,
    /// Origin city, normalized as "City, Country"
    pub origin: Option<String>,
    /// Destination city, normalized as "City, Country"
    pub destination: Option<String>,
    /// Outbound date, not in the past
    pub departure_date: Option<NaiveDate>,
    /// Return date, strictly after departure
    pub return_date: Option<NaiveDate>,
    /// Budget per person in euros
    pub budget_per_person: Option<Decimal>,
}

impl TripRequest {
    /// Creates an empty record with no fields collected.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff all six fields are present. Derived, never stored.
    pub fn is_complete(&self) -> bool {
        self.passengers.is_some()
            && self.origin.is_some()
            && self.destination.is_some()
            && self.departure_date.is_some()
            && self.return_date.is_some()
            && self.budget_per_person.is_some()
    }

    /// Human-readable labels of the fields still missing, in a fixed order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.passengers.is_none() {
            missing.push("number of passengers");
        }
        if self.origin.is_none() {
            missing.push("origin city");
        }
        if self.destination.is_none() {
            missing.push("destination city");
        }
        if self.departure_date.is_none() {
            missing.push("departure date");
        }
        if self.return_date.is_none() {
            missing.push("return date");
        }
        if self.budget_per_person.is_none() {
            missing.push("budget per person");
        }
        missing
    }

    /// Merges one extraction pass into this record.
    ///
    /// Per field: the extracted value wins if present, otherwise the stored
    /// value is kept. A null from the extractor never clears a field -
    /// extraction is additive or overwriting, never erasing, for the life of
    /// a session.
    pub fn merged_with(&self, extracted: &ExtractedTripInfo) -> TripRequest {
        TripRequest {
            passengers: extracted.passengers.or(self.passengers),
            origin: extracted.origin.clone().or_else(|| self.origin.clone()),
            destination: extracted
                .destination
                .clone()
                .or_else(|| self.destination.clone()),
            departure_date: extracted.departure_date.or(self.departure_date),
            return_date: extracted.return_date.or(self.return_date),
            budget_per_person: extracted.budget_per_person.or(self.budget_per_person),
        }
    }
}
