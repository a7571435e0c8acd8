//! Storage trait for events and results.
//!
//! Persistence correctness relies on per-row uniqueness constraints in the
//! backing store, never on in-process shared state, so concurrent pipeline
//! runs are safe. Implementations: `MemoryStore` (always available) and
//! `PostgresStore` (feature `postgres`).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::{EventRecord, ResultRecord, ValidatedEvent, ValidatedResult};

/// Outcome of an event insert.
///
/// A duplicate is a normal idempotent outcome, not an error: the second
/// submission of the same (owner, name, date) triple is detected, rolled
/// back, and reported as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Row inserted
    Saved(EventRecord),

    /// An event with the same (owner, name, date) already exists
    Duplicate,
}

impl SaveOutcome {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate)
    }
}

/// Transactional storage for tracked events and their results.
#[async_trait]
pub trait RaceStore: Send + Sync {
    /// Insert an event inside a single transaction.
    ///
    /// A uniqueness violation on (owner, name, date) is caught inside the
    /// transaction boundary, rolled back, and reported as
    /// [`SaveOutcome::Duplicate`]. Any other fault is a
    /// `PipelineError::Storage` and is also rolled back.
    async fn insert_event(&self, owner_id: Uuid, event: &ValidatedEvent) -> Result<SaveOutcome>;

    /// Append a result row for an already-resolved event. No dedup: repeated
    /// lookups append additional rows.
    async fn insert_result(
        &self,
        event_id: Uuid,
        result: &ValidatedResult,
    ) -> Result<ResultRecord>;

    /// All events owned by `owner_id`, earliest-inserted first.
    ///
    /// The ordering is load-bearing: the entity resolver's tie-break is
    /// "earliest-inserted wins".
    async fn events_for_owner(&self, owner_id: Uuid) -> Result<Vec<EventRecord>>;
}
