//! Web searcher trait: full-text web search returning ranked snippets.
//!
//! Abstracts over search providers (Tavily, SerpAPI, ...). Zero results is a
//! valid empty vector, not an error — downstream stages handle it explicitly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Search provider quality/cost tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl SearchDepth {
    /// Wire value expected by the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

/// A ranked snippet from web search.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Source URL
    pub url: String,

    /// Page title (if the provider supplied one)
    pub title: Option<String>,

    /// Text snippet/content for this hit
    pub content: String,

    /// Relevance score (0.0-1.0, if the provider supplied one)
    pub score: Option<f32>,
}

impl SearchHit {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            content: content.into(),
            score: None,
        }
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a relevance score.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }
}

/// Full-text web search over ranked snippets.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Issue a query and return up to `max_results` ranked hits.
    ///
    /// `max_results` bounds the sequence length but does not guarantee it:
    /// the provider may return fewer, including zero. An empty query is
    /// rejected with [`PipelineError::InvalidQuery`].
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
        max_results: usize,
    ) -> Result<Vec<SearchHit>>;
}

/// Guard shared by implementations: reject blank queries before spending a
/// network call.
pub(crate) fn check_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(PipelineError::InvalidQuery {
            reason: "query must be non-empty".to_string(),
        });
    }
    Ok(())
}

/// Mock web searcher for testing.
///
/// Returns canned hits per query and records every query issued, so tests
/// can assert on fallback behavior.
#[derive(Default)]
pub struct MockWebSearcher {
    results: std::sync::RwLock<std::collections::HashMap<String, Vec<SearchHit>>>,
    queries: std::sync::RwLock<Vec<String>>,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned hits for a query.
    pub fn with_hits(self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.results.write().unwrap().insert(query.to_string(), hits);
        self
    }

    /// All queries issued against this mock, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(
        &self,
        query: &str,
        _depth: SearchDepth,
        max_results: usize,
    ) -> Result<Vec<SearchHit>> {
        check_query(query)?;
        self.queries.write().unwrap().push(query.to_string());

        let mut hits = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        hits.truncate(max_results);
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_canned_hits_and_records_queries() {
        let searcher = MockWebSearcher::new().with_hits(
            "madrid marathon",
            vec![
                SearchHit::new("https://maratonmadrid.com", "42K on April 27").with_score(0.9),
                SearchHit::new("https://example.com/news", "race recap"),
            ],
        );

        let hits = searcher
            .search("madrid marathon", SearchDepth::Advanced, 6)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://maratonmadrid.com");
        assert_eq!(searcher.queries(), vec!["madrid marathon".to_string()]);
    }

    #[tokio::test]
    async fn max_results_truncates() {
        let searcher = MockWebSearcher::new().with_hits(
            "q",
            vec![
                SearchHit::new("https://a.com", "a"),
                SearchHit::new("https://b.com", "b"),
                SearchHit::new("https://c.com", "c"),
            ],
        );

        let hits = searcher.search("q", SearchDepth::Basic, 2).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn unknown_query_is_a_valid_empty_sequence() {
        let searcher = MockWebSearcher::new();
        let hits = searcher
            .search("nothing here", SearchDepth::Basic, 5)
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let searcher = MockWebSearcher::new();
        let err = searcher
            .search("   ", SearchDepth::Basic, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidQuery { .. }));
    }
}
