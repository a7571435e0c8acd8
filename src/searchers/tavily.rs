//! Tavily-backed web searcher.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::security::SecretString;
use crate::traits::searcher::{check_query, SearchDepth, SearchHit, WebSearcher};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct TavilyRequest {
    query: String,
    search_depth: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    title: Option<String>,
    content: Option<String>,
    score: Option<f32>,
}

/// Web searcher backed by the Tavily API.
pub struct TavilySearcher {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
}

impl TavilySearcher {
    /// Create a new Tavily searcher with a bounded request timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: SecretString::new(api_key),
            endpoint: TAVILY_ENDPOINT.to_string(),
        }
    }

    /// Create from the `TAVILY_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY")
            .map_err(|_| PipelineError::Config("TAVILY_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Point at a different endpoint (proxies, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearcher for TavilySearcher {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
        max_results: usize,
    ) -> Result<Vec<SearchHit>> {
        check_query(query)?;

        let request = TavilyRequest {
            query: query.to_string(),
            search_depth: depth.as_str().to_string(),
            max_results,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Search(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(PipelineError::Search(Box::new(std::io::Error::other(
                format!("Tavily API error: {}", response.status()),
            ))));
        }

        let tavily_response: TavilyResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Search(Box::new(e)))?;

        Ok(tavily_response
            .results
            .into_iter()
            .map(|r| {
                let mut hit = SearchHit::new(r.url, r.content.unwrap_or_default());
                if let Some(title) = r.title {
                    hit = hit.with_title(title);
                }
                if let Some(score) = r.score {
                    hit = hit.with_score(score);
                }
                hit
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_endpoint() {
        let searcher = TavilySearcher::new("tvly-test").with_endpoint("http://localhost:9999");
        assert_eq!(searcher.endpoint, "http://localhost:9999");
    }

    #[tokio::test]
    async fn blank_query_fails_before_network() {
        // Unroutable endpoint: proves the guard fires first.
        let searcher = TavilySearcher::new("tvly-test").with_endpoint("http://127.0.0.1:1");
        let err = searcher
            .search("", SearchDepth::Basic, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidQuery { .. }));
    }
}
