//! Rate-limited searcher wrapper.
//!
//! Wraps any [`WebSearcher`] with a client-side quota using the governor
//! crate, so bursts of concurrent pipeline runs cannot hammer the provider.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};

use crate::error::Result;
use crate::traits::searcher::{SearchDepth, SearchHit, WebSearcher};

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A searcher wrapper that enforces a request quota.
pub struct RateLimitedSearcher<S: WebSearcher> {
    inner: S,
    limiter: Arc<DirectRateLimiter>,
}

impl<S: WebSearcher> RateLimitedSearcher<S> {
    /// Wrap `searcher` with a sustained requests-per-second limit.
    ///
    /// # Panics
    /// Panics if `requests_per_second` is zero.
    pub fn new(searcher: S, requests_per_second: u32) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(requests_per_second).expect("requests_per_second must be > 0"),
        );
        Self {
            inner: searcher,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Wrap with a custom quota (burst support etc.).
    pub fn with_quota(searcher: S, quota: Quota) -> Self {
        Self {
            inner: searcher,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

#[async_trait]
impl<S: WebSearcher> WebSearcher for RateLimitedSearcher<S> {
    async fn search(
        &self,
        query: &str,
        depth: SearchDepth,
        max_results: usize,
    ) -> Result<Vec<SearchHit>> {
        self.limiter.until_ready().await;
        self.inner.search(query, depth, max_results).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::searcher::MockWebSearcher;
    use nonzero_ext::nonzero;

    #[tokio::test]
    async fn passes_through_to_inner_searcher() {
        let inner = MockWebSearcher::new()
            .with_hits("q", vec![SearchHit::new("https://a.com", "snippet")]);
        let limited = RateLimitedSearcher::new(inner, 10);

        let hits = limited.search("q", SearchDepth::Basic, 5).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn custom_quota_allows_bursts() {
        let quota = Quota::per_second(nonzero!(1u32)).allow_burst(nonzero!(3u32));
        let limited = RateLimitedSearcher::with_quota(MockWebSearcher::new(), quota);

        // Three calls fit in the burst allowance without waiting a second.
        for _ in 0..3 {
            limited.search("q", SearchDepth::Basic, 5).await.unwrap();
        }
    }
}
