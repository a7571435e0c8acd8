//! Pipeline orchestrators - the core of the library.
//!
//! Two end-to-end flows compose the stages:
//! - [`ingest`] - event ingestion: search → assemble → extract → validate →
//!   (confirm?) → persist
//! - [`lookup`] - result lookup: search (with fallback) → assemble →
//!   extract → validate → resolve → persist
//!
//! Each stage's output is the next stage's sole input; no stage reaches back
//! past its immediate predecessor.

pub mod ingest;
pub mod lookup;
pub mod prompts;

pub use ingest::{IngestOutcome, IngestPipeline, IngestStage};
pub use lookup::{LookupOutcome, LookupPipeline};
pub use prompts::{
    event_query, format_event_prompt, format_result_prompt, result_fallback_query, result_query,
};
