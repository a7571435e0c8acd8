//! Data types for the ingestion pipeline.
//!
//! The split mirrors the record lifecycle:
//! - *Draft* types ([`event::EventDraft`], [`result::ResultDraft`]) are the
//!   strictly-typed shapes the extraction oracle is constrained to emit.
//! - *Validated* types are drafts after normalization (parsed dates,
//!   canonical enums, sentinels filled in).
//! - *Record* types are persisted rows.

pub mod config;
pub mod event;
pub mod result;

pub use config::{IngestMode, PipelineConfig};
pub use event::{EventDraft, EventRecord, RegistrationStatus, ValidatedEvent};
pub use result::{ResultDraft, ResultRecord, ValidatedResult};
