//! Search-and-extract ingestion pipeline for tracked sporting events.
//!
//! Turns free-text web-search snippets about a race into validated,
//! de-duplicated records, plus a companion flow that looks up one athlete's
//! result within an event the user already tracks.
//!
//! # Pipeline
//!
//! ```text
//! orchestrator → searcher → context assembler → oracle → validator
//!              → (entity resolver, for results) → store
//! ```
//!
//! Each stage's output is the next stage's sole input. Upstream services are
//! unreliable by assumption: the searcher may return zero hits, the oracle
//! may throttle or refuse to conform to the record shapes, and source texts
//! may contradict each other. The pipeline recovers everything recoverable
//! into structured outcomes ([`IngestOutcome`], [`LookupOutcome`]) and
//! reserves hard errors for transport and conformance faults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use racehub::{GroqOracle, IngestPipeline, PostgresStore, TavilySearcher};
//! use racehub::types::{IngestMode, PipelineConfig};
//!
//! let pipeline = IngestPipeline::new(
//!     TavilySearcher::from_env()?,
//!     GroqOracle::from_env()?,
//!     PostgresStore::new(&database_url).await?,
//! )
//! .with_config(PipelineConfig::new().with_mode(IngestMode::Automated));
//!
//! match pipeline.ingest(owner_id, "Madrid Marathon").await? {
//!     IngestOutcome::Saved(event) => println!("tracking {}", event.name),
//!     IngestOutcome::Duplicate { name, .. } => println!("{name} already tracked"),
//!     other => println!("{other:?}"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - seams for the searcher, oracle, and store
//! - [`types`] - drafts, validated values, records, configuration
//! - [`pipeline`] - the two orchestrators and their prompts
//! - [`validate`] - pure schema validation and normalization
//! - [`resolve`] - exact-then-fuzzy entity resolution
//! - [`searchers`] - Tavily implementation and rate-limit wrapper
//! - [`oracle`] - Groq structured-output oracle
//! - [`stores`] - memory and Postgres backends
//! - [`testing`] - mock oracle for tests

pub mod context;
pub mod error;
pub mod oracle;
pub mod pipeline;
pub mod resolve;
pub mod searchers;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export core types at crate root
pub use error::{FieldViolation, PipelineError, Result, SchemaViolation};
pub use traits::{
    oracle::ExtractionOracle,
    searcher::{MockWebSearcher, SearchDepth, SearchHit, WebSearcher},
    store::{RaceStore, SaveOutcome},
};
pub use types::{
    EventDraft, EventRecord, IngestMode, PipelineConfig, RegistrationStatus, ResultDraft,
    ResultRecord, ValidatedEvent, ValidatedResult,
};

// Re-export pipeline components
pub use pipeline::{IngestOutcome, IngestPipeline, LookupOutcome, LookupPipeline};

// Re-export implementations
pub use oracle::GroqOracle;
pub use searchers::{RateLimitedSearcher, TavilySearcher};
pub use stores::MemoryStore;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;

// Re-export context assembly
pub use context::{assemble_contents, assemble_with_provenance, CONTEXT_SEPARATOR};

// Re-export testing utilities
pub use testing::{MockFailure, MockOracle, OracleCall};
