//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::traits::searcher::SearchDepth;

/// Whether a validated draft needs explicit human confirmation before it is
/// persisted.
///
/// One configuration flag, one code path: the orchestrator either returns an
/// `AwaitingConfirmation` outcome or persists unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestMode {
    /// Present the draft and wait for an explicit confirm call
    Interactive,

    /// Persist without confirmation (automated callers)
    Automated,
}

/// Configuration shared by both orchestrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Confirmation policy for event ingestion
    pub mode: IngestMode,

    /// Search provider quality/cost tier
    pub search_depth: SearchDepth,

    /// Upper bound on search results per query (provider may return fewer)
    pub max_results: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: IngestMode::Interactive,
            search_depth: SearchDepth::Advanced,
            max_results: 6,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ingest mode.
    pub fn with_mode(mut self, mode: IngestMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the search depth.
    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    /// Set the maximum number of search results per query.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_settings() {
        let config = PipelineConfig::default();
        assert_eq!(config.mode, IngestMode::Interactive);
        assert_eq!(config.search_depth, SearchDepth::Advanced);
        assert_eq!(config.max_results, 6);
    }

    #[test]
    fn builder_overrides() {
        let config = PipelineConfig::new()
            .with_mode(IngestMode::Automated)
            .with_search_depth(SearchDepth::Basic)
            .with_max_results(3);
        assert_eq!(config.mode, IngestMode::Automated);
        assert_eq!(config.search_depth, SearchDepth::Basic);
        assert_eq!(config.max_results, 3);
    }
}
