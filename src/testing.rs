//! Testing utilities: mock oracle with call tracking.
//!
//! `MockWebSearcher` lives next to its trait in
//! [`crate::traits::searcher`]; `MemoryStore` in [`crate::stores`]. This
//! module adds the oracle double so applications can exercise full pipeline
//! runs without a real LLM call.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{PipelineError, Result};
use crate::traits::oracle::ExtractionOracle;
use crate::types::{EventDraft, ResultDraft};

/// Record of a call made to the mock oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleCall {
    ExtractEvent { event_name: String },
    ExtractResult { athlete_name: String, year: i32 },
}

/// Failure the mock can be armed to return on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Retry budget exhausted against a throttling provider
    RateLimited,

    /// Model would not emit the required shape
    SchemaConformance,
}

/// A mock extraction oracle with canned drafts and call tracking.
#[derive(Default)]
pub struct MockOracle {
    event_drafts: RwLock<HashMap<String, EventDraft>>,
    result_drafts: RwLock<HashMap<String, ResultDraft>>,
    failure: RwLock<Option<MockFailure>>,
    calls: RwLock<Vec<OracleCall>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned event draft, keyed by event name.
    pub fn with_event_draft(self, event_name: &str, draft: EventDraft) -> Self {
        self.event_drafts
            .write()
            .unwrap()
            .insert(event_name.to_string(), draft);
        self
    }

    /// Add a canned result draft, keyed by athlete name.
    pub fn with_result_draft(self, athlete_name: &str, draft: ResultDraft) -> Self {
        self.result_drafts
            .write()
            .unwrap()
            .insert(athlete_name.to_string(), draft);
        self
    }

    /// Arm the mock to fail every call with the given kind.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        *self.failure.write().unwrap() = Some(failure);
        self
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.read().unwrap().clone()
    }

    fn armed_failure(&self) -> Option<PipelineError> {
        self.failure.read().unwrap().map(|f| match f {
            MockFailure::RateLimited => PipelineError::RateLimited { attempts: 3 },
            MockFailure::SchemaConformance => {
                PipelineError::SchemaConformance("mock refused to conform".to_string())
            }
        })
    }
}

#[async_trait]
impl ExtractionOracle for MockOracle {
    async fn extract_event(
        &self,
        event_name: &str,
        _context: &str,
        _current_year: i32,
    ) -> Result<EventDraft> {
        self.calls.write().unwrap().push(OracleCall::ExtractEvent {
            event_name: event_name.to_string(),
        });

        if let Some(err) = self.armed_failure() {
            return Err(err);
        }

        self.event_drafts
            .read()
            .unwrap()
            .get(event_name)
            .cloned()
            .ok_or_else(|| {
                PipelineError::SchemaConformance(format!(
                    "no canned event draft for '{event_name}'"
                ))
            })
    }

    async fn extract_result(
        &self,
        athlete_name: &str,
        _event_name: &str,
        year: i32,
        _context: &str,
    ) -> Result<ResultDraft> {
        self.calls.write().unwrap().push(OracleCall::ExtractResult {
            athlete_name: athlete_name.to_string(),
            year,
        });

        if let Some(err) = self.armed_failure() {
            return Err(err);
        }

        // No canned draft means "athlete not in the sources": all-null,
        // exactly what the real prompt instructs the model to return.
        Ok(self
            .result_drafts
            .read()
            .unwrap()
            .get(athlete_name)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_event_draft_round_trips() {
        let draft = EventDraft {
            official_name: "Valencia Triathlon".to_string(),
            sport: "Triathlon".to_string(),
            date: "2025-09-14".to_string(),
            place: "Valencia, Spain".to_string(),
            distances: vec!["Olympic".into()],
            official_url: None,
            registration_status: "pending".to_string(),
        };
        let oracle = MockOracle::new().with_event_draft("Valencia Triathlon", draft);

        let extracted = oracle
            .extract_event("Valencia Triathlon", "ctx", 2025)
            .await
            .unwrap();
        assert_eq!(extracted.official_name, "Valencia Triathlon");
        assert_eq!(
            oracle.calls(),
            vec![OracleCall::ExtractEvent {
                event_name: "Valencia Triathlon".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn unknown_event_is_a_conformance_failure() {
        let oracle = MockOracle::new();
        let err = oracle.extract_event("Unknown", "ctx", 2025).await.unwrap_err();
        assert!(matches!(err, PipelineError::SchemaConformance(_)));
    }

    #[tokio::test]
    async fn unknown_athlete_is_an_empty_draft() {
        let oracle = MockOracle::new();
        let draft = oracle
            .extract_result("Nobody", "Boston Marathon", 2024, "ctx")
            .await
            .unwrap();
        assert!(draft.is_empty());
    }

    #[tokio::test]
    async fn armed_rate_limit_failure_fires() {
        let oracle = MockOracle::new().with_failure(MockFailure::RateLimited);
        let err = oracle.extract_event("Any", "ctx", 2025).await.unwrap_err();
        assert!(matches!(err, PipelineError::RateLimited { .. }));
    }
}
