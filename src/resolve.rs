//! Entity resolution: match an extracted result to an existing event.
//!
//! Exact-then-fuzzy: a case-insensitive substring pass over the owner's
//! event names, then a retry with only the first five characters of the
//! candidate. The prefix fallback is a deliberately loose heuristic
//! inherited from the source system to tolerate naming drift between
//! ingestion time and lookup time; `match_event` is the single place it
//! lives if a proper edit-distance match ever replaces it.

use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::RaceStore;
use crate::types::EventRecord;

/// Pure matching over an insertion-ordered slice of events.
///
/// First match wins on both passes, so with the slice ordered
/// earliest-inserted-first the tie-break is deterministic.
pub fn match_event<'a>(events: &'a [EventRecord], candidate: &str) -> Option<&'a EventRecord> {
    let needle = candidate.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(event) = events
        .iter()
        .find(|e| e.name.to_lowercase().contains(&needle))
    {
        return Some(event);
    }

    let prefix: String = needle.chars().take(5).collect();
    events
        .iter()
        .find(|e| e.name.to_lowercase().contains(&prefix))
}

/// Resolve a candidate event name against the owner's tracked events.
///
/// Returns `None` (never an error) when nothing matches under either pass;
/// the caller decides whether that is fatal.
pub async fn resolve<R: RaceStore + ?Sized>(
    store: &R,
    owner_id: Uuid,
    candidate: &str,
) -> Result<Option<EventRecord>> {
    let events = store.events_for_owner(owner_id).await?;
    let matched = match_event(&events, candidate).cloned();
    debug!(
        owner = %owner_id,
        candidate,
        resolved = matched.as_ref().map(|e| e.name.as_str()),
        "entity resolution"
    );
    Ok(matched)
}
