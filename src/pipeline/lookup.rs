//! Result lookup pipeline.
//!
//! Finds one athlete's result in a past event the user already tracks. The
//! primary query targets the athlete by name; if it returns nothing the
//! pipeline retries once with a broader "results pdf" style query. Two empty
//! searches short-circuit to a structured not-found outcome without spending
//! an oracle call or writing a row — an athlete absent from public results
//! is never a bare failure.

use tracing::{debug, info};
use uuid::Uuid;

use crate::context::assemble_with_provenance;
use crate::error::{PipelineError, Result};
use crate::pipeline::prompts::{result_fallback_query, result_query};
use crate::resolve::resolve;
use crate::traits::oracle::ExtractionOracle;
use crate::traits::searcher::{SearchHit, WebSearcher};
use crate::traits::store::RaceStore;
use crate::types::{EventRecord, PipelineConfig, ResultRecord};
use crate::validate::validate_result;

/// Structured outcome of a result lookup.
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// A result row was written for the resolved event.
    /// `found_time` is false when the athlete was not in the sources and the
    /// row carries the "not found" sentinel.
    Recorded {
        record: ResultRecord,
        event: EventRecord,
        found_time: bool,
    },

    /// Neither the primary nor the fallback search produced usable text;
    /// nothing was extracted or written
    NoPublicResults,

    /// No tracked event of this owner matched the candidate name; nothing
    /// was written
    EventNotFound { candidate: String },
}

impl LookupOutcome {
    /// Whether an official time was found.
    pub fn found(&self) -> bool {
        matches!(
            self,
            Self::Recorded {
                found_time: true,
                ..
            }
        )
    }
}

/// Result lookup orchestrator.
pub struct LookupPipeline<S, O, R> {
    searcher: S,
    oracle: O,
    store: R,
    config: PipelineConfig,
}

impl<S, O, R> LookupPipeline<S, O, R>
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

    /// Look up `athlete_name`'s result in `event_name` (edition `year`) and
    /// record it against the owner's matching tracked event.
    pub async fn lookup(
        &self,
        owner_id: Uuid,
        event_name: &str,
        athlete_name: &str,
        year: i32,
    ) -> Result<LookupOutcome> {
        let hits = self.search_with_fallback(event_name, athlete_name, year).await?;
        if hits.is_empty() {
            info!(athlete_name, event_name, "no public results found");
            return Ok(LookupOutcome::NoPublicResults);
        }

        let context = match assemble_with_provenance(&hits) {
            Ok(context) => context,
            Err(PipelineError::EmptyContext) => {
                info!(athlete_name, event_name, "search hits had no usable text");
                return Ok(LookupOutcome::NoPublicResults);
            }
            Err(e) => return Err(e),
        };

        debug!(context_len = context.len(), "invoking oracle for result extraction");
        let draft = self
            .oracle
            .extract_result(athlete_name, event_name, year, &context)
            .await?;
        let validated = validate_result(&draft, year);

        let event = match resolve(&self.store, owner_id, event_name).await? {
            Some(event) => event,
            None => {
                info!(event_name, "no tracked event resolves the candidate name");
                return Ok(LookupOutcome::EventNotFound {
                    candidate: event_name.to_string(),
                });
            }
        };

        let found_time = validated.found_time();
        let record = self.store.insert_result(event.id, &validated).await?;
        info!(
            athlete_name,
            event = %event.name,
            time = %record.official_time,
            "result recorded"
        );

        Ok(LookupOutcome::Recorded {
            record,
            event,
            found_time,
        })
    }

    /// Primary query, then one broader fallback if it returns zero hits.
    async fn search_with_fallback(
        &self,
        event_name: &str,
        athlete_name: &str,
        year: i32,
    ) -> Result<Vec<SearchHit>> {
        let primary = result_query(event_name, year, athlete_name);
        let hits = self
            .searcher
            .search(&primary, self.config.search_depth, self.config.max_results)
            .await?;
        if !hits.is_empty() {
            return Ok(hits);
        }

        let fallback = result_fallback_query(event_name, year);
        debug!(query = %fallback, "primary search empty, trying fallback");
        self.searcher
            .search(&fallback, self.config.search_depth, self.config.max_results)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::prompts;
    use crate::stores::MemoryStore;
    use crate::testing::MockOracle;
    use crate::traits::searcher::MockWebSearcher;

    #[tokio::test]
    async fn double_zero_search_writes_nothing_and_skips_oracle() {
        let pipeline = LookupPipeline::new(
            MockWebSearcher::new(),
            MockOracle::new(),
            MemoryStore::new(),
        );

        let outcome = pipeline
            .lookup(Uuid::new_v4(), "Boston Marathon", "Jane Doe", 2024)
            .await
            .unwrap();

        assert!(matches!(outcome, LookupOutcome::NoPublicResults));
        assert!(!outcome.found());
        assert!(pipeline.oracle.calls().is_empty());
        assert_eq!(pipeline.store.result_count(), 0);

        // Both the primary and the broader fallback query were tried.
        let queries = pipeline.searcher.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], prompts::result_query("Boston Marathon", 2024, "Jane Doe"));
        assert_eq!(queries[1], prompts::result_fallback_query("Boston Marathon", 2024));
    }
}
