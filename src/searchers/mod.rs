//! Search provider implementations.
//!
//! - `TavilySearcher` - Tavily full-text web search API
//! - `RateLimitedSearcher` - wrapper that adds a client-side request quota

pub mod rate_limited;
pub mod tavily;

pub use rate_limited::RateLimitedSearcher;
pub use tavily::TavilySearcher;
