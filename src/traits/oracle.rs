//! Extraction oracle trait: schema-constrained text-generation.
//!
//! The oracle turns a blob of assembled search context into exactly one of
//! two fixed record shapes ([`EventDraft`] or [`ResultDraft`]). If the
//! underlying model cannot be made to emit the shape, implementations fail
//! with `PipelineError::SchemaConformance` rather than return a
//! partially-typed value. Throttling is the implementation's problem:
//! bounded retry with backoff at the transport layer, surfacing
//! `PipelineError::RateLimited` once the budget runs out.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{EventDraft, ResultDraft};

/// Schema-constrained extraction over a text-generation model.
#[async_trait]
pub trait ExtractionOracle: Send + Sync {
    /// Extract master data for an event from assembled search context.
    ///
    /// `current_year` anchors the hard constraint that dates from earlier
    /// editions are rejected rather than extracted.
    async fn extract_event(
        &self,
        event_name: &str,
        context: &str,
        current_year: i32,
    ) -> Result<EventDraft>;

    /// Extract one athlete's result in a past event from assembled context.
    ///
    /// Implementations must instruct the model to tolerate name variants
    /// (surname-first ordering, case, missing diacritics) and to return
    /// all-null fields rather than guess when no confident match exists.
    async fn extract_result(
        &self,
        athlete_name: &str,
        event_name: &str,
        year: i32,
        context: &str,
    ) -> Result<ResultDraft>;
}
