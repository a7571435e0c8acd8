//! Result types: a participant's outcome in an event the user tracks.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel stored when extraction found no official time.
pub const TIME_NOT_FOUND: &str = "not found";

/// Unvalidated result data as the oracle emits it.
///
/// All fields are optional: the prompt instructs the oracle to return
/// all-null rather than guess when no confident athlete match exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ResultDraft {
    /// Official finishing time, e.g. "3:41:27"
    pub official_time: Option<String>,

    /// Overall/scratch finishing position
    pub overall_position: Option<i32>,

    /// Position within the athlete's age group or category
    pub category_position: Option<i32>,

    /// Average pace, e.g. "5:14 min/km"
    pub average_pace: Option<String>,
}

impl ResultDraft {
    /// Whether extraction produced nothing at all.
    pub fn is_empty(&self) -> bool {
        self.official_time.is_none()
            && self.overall_position.is_none()
            && self.category_position.is_none()
            && self.average_pace.is_none()
    }
}

/// A result draft after normalization: missing time replaced by the
/// [`TIME_NOT_FOUND`] sentinel, category position folded into the comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResult {
    pub official_time: String,
    pub overall_position: Option<i32>,
    pub average_pace: Option<String>,

    /// Annotation recording the search year and category position
    pub comments: String,
}

impl ValidatedResult {
    /// Whether a real time was found (not the sentinel).
    pub fn found_time(&self) -> bool {
        self.official_time != TIME_NOT_FOUND
    }
}

/// A persisted result row. Repeated lookups append additional rows; there is
/// no upsert or merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub id: Uuid,
    pub event_id: Uuid,
    pub official_time: String,
    pub overall_position: Option<i32>,
    pub average_pace: Option<String>,
    pub comments: String,
    pub created_at: DateTime<Utc>,
}
