//! In-memory EventStore.
//!
//! Backs standalone runs and tests. Failure toggles let tests exercise the
//! error paths of callers.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::helpers::validate_append;
use super::{EventStore, Result, StorageError};
use crate::model::EventPage;

/// Stored event with correlation tracking.
struct StoredEvent {
    page: EventPage,
    correlation_id: String,
}

/// Event store that keeps streams in memory.
#[derive(Default)]
pub struct MemoryEventStore {
    events: RwLock<HashMap<(String, Uuid), Vec<StoredEvent>>>,
    fail_on_add: RwLock<bool>,
    conflicts_remaining: RwLock<u32>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_add(&self, fail: bool) {
        *self.fail_on_add.write().await = fail;
    }

    /// Make the next `count` appends fail with a sequence conflict, as if a
    /// concurrent writer got there first.
    pub async fn inject_conflicts(&self, count: u32) {
        *self.conflicts_remaining.write().await = count;
    }

    /// Correlation ids recorded for a stream, in event order.
    pub async fn correlation_ids(&self, domain: &str, root: Uuid) -> Vec<String> {
        let store = self.events.read().await;
        store
            .get(&(domain.to_string(), root))
            .map(|events| events.iter().map(|e| e.correlation_id.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn add(
        &self,
        domain: &str,
        root: Uuid,
        events: Vec<EventPage>,
        correlation_id: &str,
    ) -> Result<()> {
        if *self.fail_on_add.read().await {
            return Err(StorageError::Io(std::io::Error::other(
                "in-memory store set to fail",
            )));
        }

        let mut store = self.events.write().await;
        let stream = store.entry((domain.to_string(), root)).or_default();
        let next = stream.len() as u32;

        {
            let mut remaining = self.conflicts_remaining.write().await;
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StorageError::SequenceConflict {
                    expected: next + 1,
                    actual: events.first().map(|e| e.sequence).unwrap_or(next),
                });
            }
        }

        validate_append(&events, next)?;

        stream.extend(events.into_iter().map(|page| StoredEvent {
            page,
            correlation_id: correlation_id.to_string(),
        }));
        Ok(())
    }

    async fn get(&self, domain: &str, root: Uuid) -> Result<Vec<EventPage>> {
        self.get_from(domain, root, 0).await
    }

    async fn get_from(&self, domain: &str, root: Uuid, from: u32) -> Result<Vec<EventPage>> {
        let store = self.events.read().await;
        Ok(store
            .get(&(domain.to_string(), root))
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.page.sequence >= from)
                    .map(|e| e.page.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_roots(&self, domain: &str) -> Result<Vec<Uuid>> {
        let store = self.events.read().await;
        Ok(store
            .iter()
            .filter(|((d, _), events)| d == domain && !events.is_empty())
            .map(|((_, r), _)| *r)
            .collect())
    }

    async fn get_next_sequence(&self, domain: &str, root: Uuid) -> Result<u32> {
        let store = self.events.read().await;
        Ok(store
            .get(&(domain.to_string(), root))
            .map(|events| events.len() as u32)
            .unwrap_or(0))
    }
}
