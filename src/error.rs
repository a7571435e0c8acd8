//! Typed errors for the ingestion pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on failure kinds. Recoverable outcomes (duplicate event, unresolvable
//! parent event, nothing found) are *not* errors — they are modeled on the
//! pipeline outcome enums instead.

use std::fmt;

use thiserror::Error;

/// Errors that can occur during a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Search provider unreachable or errored
    #[error("search failed: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No usable text in the search results; raised before any oracle call
    #[error("no usable text in search results")]
    EmptyContext,

    /// Extraction provider kept throttling after the retry budget ran out.
    ///
    /// Distinct from [`PipelineError::Oracle`] so callers can tell the user
    /// to wait and retry rather than treat it as a hard fault.
    #[error("extraction provider rate limited ({attempts} attempts)")]
    RateLimited { attempts: u32 },

    /// The oracle could not produce the required record shape
    #[error("oracle output did not match the expected shape: {0}")]
    SchemaConformance(String),

    /// Any other extraction provider fault (transport, API error)
    #[error("oracle error: {0}")]
    Oracle(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Post-hoc validation of the extracted draft failed
    #[error("{0}")]
    Validation(#[from] SchemaViolation),

    /// Storage fault other than a duplicate key (those are outcomes)
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid query provided by the caller
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// Configuration error (missing credentials, bad base URL, ...)
    #[error("config error: {0}")]
    Config(String),
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as it appears on the draft
    pub field: &'static str,

    /// What was wrong with it
    pub problem: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, problem: impl Into<String>) -> Self {
        Self {
            field,
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Validation failure carrying **every** violated field, not just the first,
/// so a reviewer sees the complete picture in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub violations: Vec<FieldViolation>,
}

impl SchemaViolation {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Number of violated fields.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether a given field is among the violations.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema violation [")?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl std::error::Error for SchemaViolation {}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
