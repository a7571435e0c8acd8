//! Event ingestion pipeline.
//!
//! Builds a query from the event name and current year, gathers context,
//! extracts a draft through the oracle, validates it, and persists —
//! immediately in automated mode, or after an explicit confirm call in
//! interactive mode. One code path; the mode is a configuration flag.

use chrono::{Datelike, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::context::assemble_contents;
use crate::error::{PipelineError, Result, SchemaViolation};
use crate::pipeline::prompts::event_query;
use crate::traits::oracle::ExtractionOracle;
use crate::traits::searcher::WebSearcher;
use crate::traits::store::{RaceStore, SaveOutcome};
use crate::types::{EventRecord, IngestMode, PipelineConfig, ValidatedEvent};
use crate::validate::validate_event;

/// Stages of an ingestion run, logged as the pipeline advances.
/// `AwaitingConfirmation` only occurs in interactive mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Searching,
    Extracting,
    Validating,
    AwaitingConfirmation,
    Persisting,
}

/// Structured outcome of an ingestion run.
///
/// Recoverable conditions (nothing found, validation failure, duplicate) are
/// outcomes here; only transport, throttling-exhaustion, conformance and
/// storage faults surface as errors.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    /// Event persisted
    Saved(EventRecord),

    /// Identical (owner, name, date) already tracked; nothing written
    Duplicate { name: String, date: chrono::NaiveDate },

    /// Interactive mode: draft is ready, waiting for a confirm call
    AwaitingConfirmation(ValidatedEvent),

    /// The oracle's draft failed validation; every broken field listed
    Invalid(SchemaViolation),

    /// Search produced no usable text; the oracle was never invoked
    NothingFound,
}

/// Event ingestion orchestrator.
///
/// Dependencies are injected so tests can substitute fakes; nothing here
/// holds request-scoped state between runs.
pub struct IngestPipeline<S, O, R> {
    searcher: S,
    oracle: O,
    store: R,
    config: PipelineConfig,
}

impl<S, O, R> IngestPipeline<S, O, R>
where
    S: WebSearcher,
    O: ExtractionOracle,
    R: RaceStore,
{
    pub fn new(searcher: S, oracle: O, store: R) -> Self {
        Self {
            searcher,
            oracle,
            store,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// The injected store (read-backs, tests).
    pub fn store(&self) -> &R {
        &self.store
    }

    /// The injected oracle (call-tracking assertions in tests).
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Run the pipeline for `event_name`, anchored to the current year.
    pub async fn ingest(&self, owner_id: Uuid, event_name: &str) -> Result<IngestOutcome> {
        self.ingest_as_of(owner_id, event_name, Utc::now().year())
            .await
    }

    /// Run the pipeline anchored to an explicit year (testable variant).
    pub async fn ingest_as_of(
        &self,
        owner_id: Uuid,
        event_name: &str,
        current_year: i32,
    ) -> Result<IngestOutcome> {
        debug!(stage = ?IngestStage::Searching, event_name, "ingest run started");
        let query = event_query(event_name, current_year);
        let hits = self
            .searcher
            .search(&query, self.config.search_depth, self.config.max_results)
            .await?;
        info!(hits = hits.len(), query, "search complete");

        let context = match assemble_contents(&hits) {
            Ok(context) => context,
            Err(PipelineError::EmptyContext) => {
                info!(event_name, "no usable search content, skipping oracle");
                return Ok(IngestOutcome::NothingFound);
            }
            Err(e) => return Err(e),
        };

        debug!(stage = ?IngestStage::Extracting, context_len = context.len(), "invoking oracle");
        let draft = self
            .oracle
            .extract_event(event_name, &context, current_year)
            .await?;

        debug!(stage = ?IngestStage::Validating, "validating draft");
        let validated = match validate_event(&draft) {
            Ok(validated) => validated,
            Err(violation) => {
                info!(%violation, "draft failed validation");
                return Ok(IngestOutcome::Invalid(violation));
            }
        };

        match self.config.mode {
            IngestMode::Interactive => {
                debug!(stage = ?IngestStage::AwaitingConfirmation, name = %validated.name, "awaiting confirmation");
                Ok(IngestOutcome::AwaitingConfirmation(validated))
            }
            IngestMode::Automated => self.persist(owner_id, validated).await,
        }
    }

    /// Persist a human-approved draft (the interactive mode's second half).
    pub async fn confirm(
        &self,
        owner_id: Uuid,
        validated: ValidatedEvent,
    ) -> Result<IngestOutcome> {
        self.persist(owner_id, validated).await
    }

    async fn persist(&self, owner_id: Uuid, validated: ValidatedEvent) -> Result<IngestOutcome> {
        debug!(stage = ?IngestStage::Persisting, name = %validated.name, "persisting event");
        match self.store.insert_event(owner_id, &validated).await? {
            SaveOutcome::Saved(record) => {
                info!(name = %record.name, sport = %record.sport, "event saved");
                Ok(IngestOutcome::Saved(record))
            }
            SaveOutcome::Duplicate => Ok(IngestOutcome::Duplicate {
                name: validated.name,
                date: validated.date,
            }),
        }
    }
}
