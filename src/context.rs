//! Context assembly: merge search snippets into one bounded text blob.
//!
//! The ingestion flow concatenates content only; the lookup flow includes
//! URL and title per snippet, since provenance and page titles help the
//! oracle disambiguate result listings. Both short-circuit with
//! [`PipelineError::EmptyContext`] before a costly oracle call when there is
//! no usable text.

use crate::error::{PipelineError, Result};
use crate::traits::searcher::SearchHit;

/// Separator between snippets in the assembled blob.
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Join the content fields of the hits (event-ingestion flow).
///
/// Blank-after-trim snippets are dropped; fails with `EmptyContext` when
/// nothing survives (including the zero-hit case).
pub fn assemble_contents(hits: &[SearchHit]) -> Result<String> {
    let parts: Vec<&str> = hits
        .iter()
        .map(|h| h.content.trim())
        .filter(|c| !c.is_empty())
        .collect();

    if parts.is_empty() {
        return Err(PipelineError::EmptyContext);
    }
    Ok(parts.join(CONTEXT_SEPARATOR))
}

/// Join full (url, title, content) triples (result-lookup flow).
pub fn assemble_with_provenance(hits: &[SearchHit]) -> Result<String> {
    let parts: Vec<String> = hits
        .iter()
        .filter(|h| !h.content.trim().is_empty())
        .map(|h| {
            format!(
                "Source: {}\nTitle: {}\n{}",
                h.url,
                h.title.as_deref().unwrap_or("Untitled"),
                h.content.trim()
            )
        })
        .collect();

    if parts.is_empty() {
        return Err(PipelineError::EmptyContext);
    }
    Ok(parts.join(CONTEXT_SEPARATOR))
}
