//! In-memory storage for testing and development.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::traits::store::{RaceStore, SaveOutcome};
use crate::types::{EventRecord, ResultRecord, ValidatedEvent, ValidatedResult};

/// In-memory store with the same outcome semantics as the SQL backend.
///
/// Rows live in insertion-ordered vectors, which also gives the resolver its
/// earliest-inserted-first ordering for free. Data is lost on drop; not for
/// production.
#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<Vec<EventRecord>>,
    results: RwLock<Vec<ResultRecord>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events.
    pub fn event_count(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Number of stored result rows.
    pub fn result_count(&self) -> usize {
        self.results.read().unwrap().len()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.events.write().unwrap().clear();
        self.results.write().unwrap().clear();
    }
}

#[async_trait]
impl RaceStore for MemoryStore {
    async fn insert_event(&self, owner_id: Uuid, event: &ValidatedEvent) -> Result<SaveOutcome> {
        let mut events = self.events.write().unwrap();

        // Same uniqueness rule the SQL schema enforces.
        let duplicate = events
            .iter()
            .any(|e| e.owner_id == owner_id && e.name == event.name && e.date == event.date);
        if duplicate {
            info!(name = %event.name, date = %event.date, "duplicate event, skipping insert");
            return Ok(SaveOutcome::Duplicate);
        }

        let record = EventRecord {
            id: Uuid::new_v4(),
            owner_id,
            name: event.name.clone(),
            sport: event.sport.clone(),
            date: event.date,
            place: event.place.clone(),
            distance_summary: event.distance_summary(),
            official_url: event.official_url.clone(),
            registration_status: event.registration_status.as_str().to_string(),
            created_at: Utc::now(),
        };
        events.push(record.clone());
        Ok(SaveOutcome::Saved(record))
    }

    async fn insert_result(
        &self,
        event_id: Uuid,
        result: &ValidatedResult,
    ) -> Result<ResultRecord> {
        let record = ResultRecord {
            id: Uuid::new_v4(),
            event_id,
            official_time: result.official_time.clone(),
            overall_position: result.overall_position,
            average_pace: result.average_pace.clone(),
            comments: result.comments.clone(),
            created_at: Utc::now(),
        };
        self.results.write().unwrap().push(record.clone());
        Ok(record)
    }

    async fn events_for_owner(&self, owner_id: Uuid) -> Result<Vec<EventRecord>> {
        Ok(self
            .events
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegistrationStatus;
    use chrono::NaiveDate;

    fn validated(name: &str) -> ValidatedEvent {
        ValidatedEvent {
            name: name.to_string(),
            sport: "Running".to_string(),
            sport_recognized: true,
            date: NaiveDate::from_ymd_opt(2025, 4, 27).unwrap(),
            place: "Madrid, Spain".to_string(),
            distances: vec!["42K".into()],
            official_url: None,
            registration_status: RegistrationStatus::Open,
        }
    }

    #[tokio::test]
    async fn second_identical_insert_is_a_duplicate_with_one_row() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let first = store.insert_event(owner, &validated("Madrid Marathon")).await.unwrap();
        assert!(matches!(first, SaveOutcome::Saved(_)));

        let second = store.insert_event(owner, &validated("Madrid Marathon")).await.unwrap();
        assert!(second.is_duplicate());
        assert_eq!(store.event_count(), 1);
    }

    #[tokio::test]
    async fn same_triple_different_owner_is_not_a_duplicate() {
        let store = MemoryStore::new();
        store
            .insert_event(Uuid::new_v4(), &validated("Madrid Marathon"))
            .await
            .unwrap();
        let other = store
            .insert_event(Uuid::new_v4(), &validated("Madrid Marathon"))
            .await
            .unwrap();
        assert!(matches!(other, SaveOutcome::Saved(_)));
        assert_eq!(store.event_count(), 2);
    }

    #[tokio::test]
    async fn events_come_back_in_insertion_order() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        store.insert_event(owner, &validated("Boston Marathon")).await.unwrap();
        store.insert_event(owner, &validated("Boston 10K")).await.unwrap();

        let events = store.events_for_owner(owner).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Boston Marathon");
        assert_eq!(events[1].name, "Boston 10K");
    }

    #[tokio::test]
    async fn repeated_result_inserts_append_rows() {
        let store = MemoryStore::new();
        let result = ValidatedResult {
            official_time: "3:41:27".to_string(),
            overall_position: Some(120),
            average_pace: None,
            comments: "search year 2024; category position 14".to_string(),
        };
        let event_id = Uuid::new_v4();
        store.insert_result(event_id, &result).await.unwrap();
        store.insert_result(event_id, &result).await.unwrap();
        assert_eq!(store.result_count(), 2);
    }
}
