//! Event types: draft (oracle output), validated value, persisted record.

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sport categories the validator recognizes.
///
/// Deliberately an open set: unknown values pass validation with a warning
/// (see `validate::validate_sport`) since new categories legitimately appear.
pub const KNOWN_SPORTS: [&str; 5] = ["Running", "Trail", "Cycling", "Gravel", "Triathlon"];

/// Unvalidated event data as the oracle emits it.
///
/// Every field is free text; normalization happens in the validator, keeping
/// the oracle seam independent of the provider's formatting quirks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventDraft {
    /// Official event name
    pub official_name: String,

    /// Sport category (expected: Running, Trail, Cycling, Gravel, Triathlon)
    pub sport: String,

    /// Event date as free text (the prompt asks for YYYY-MM-DD)
    pub date: String,

    /// City and country
    pub place: String,

    /// All offered distances, e.g. ["10K", "21K", "42K"]
    pub distances: Vec<String>,

    /// Official or registration URL, if one was found
    pub official_url: Option<String>,

    /// Registration status (expected: open, closed or pending)
    pub registration_status: String,
}

/// Registration status, canonicalized to lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Open,
    Closed,
    Pending,
}

impl RegistrationStatus {
    /// Canonical lowercase form, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event draft after validation and normalization.
///
/// This is what gets presented for human confirmation in interactive mode
/// and what the persistence layer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEvent {
    pub name: String,
    pub sport: String,

    /// False when the sport was not one of [`KNOWN_SPORTS`]; accepted anyway
    pub sport_recognized: bool,

    pub date: NaiveDate,
    pub place: String,
    pub distances: Vec<String>,
    pub official_url: Option<String>,
    pub registration_status: RegistrationStatus,
}

impl ValidatedEvent {
    /// Comma-joined distance summary, as persisted.
    pub fn distance_summary(&self) -> String {
        self.distances.join(", ")
    }
}

/// A persisted event row, scoped to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub sport: String,
    pub date: NaiveDate,
    pub place: String,
    pub distance_summary: String,
    pub official_url: Option<String>,
    pub registration_status: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_summary_joins_with_comma() {
        let event = ValidatedEvent {
            name: "Madrid Marathon".to_string(),
            sport: "Running".to_string(),
            sport_recognized: true,
            date: NaiveDate::from_ymd_opt(2025, 4, 27).unwrap(),
            place: "Madrid, Spain".to_string(),
            distances: vec!["10K".into(), "21K".into(), "42K".into()],
            official_url: None,
            registration_status: RegistrationStatus::Open,
        };
        assert_eq!(event.distance_summary(), "10K, 21K, 42K");
    }

    #[test]
    fn registration_status_serializes_lowercase() {
        let json = serde_json::to_string(&RegistrationStatus::Open).unwrap();
        assert_eq!(json, r#""open""#);
        assert_eq!(RegistrationStatus::Pending.as_str(), "pending");
    }
}
