//! Case stream repository.
//!
//! Loads a case's event history and appends to it under the stream's
//! expected version.

use std::sync::Arc;

use uuid::Uuid;

use crate::model::{EventPage, MatchEvent, CASE_DOMAIN};
use crate::storage::{EventStore, Result};

/// A case's event history as loaded from storage.
#[derive(Debug, Clone, Default)]
pub struct CaseStream {
    pub case_id: Uuid,
    pub pages: Vec<EventPage>,
}

impl CaseStream {
    /// Sequence the next appended event must carry.
    pub fn next_version(&self) -> u32 {
        self.pages.last().map(|p| p.sequence + 1).unwrap_or(0)
    }

    /// Match events recorded on this stream, oldest first.
    ///
    /// Events of other types are skipped.
    pub fn match_events(&self) -> std::result::Result<Vec<MatchEvent>, serde_json::Error> {
        let mut events = Vec::new();
        for page in &self.pages {
            if let Some(event) = MatchEvent::from_page(page)? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Most recent match event recorded for a defendant.
    pub fn latest_match_for(
        &self,
        defendant_id: Uuid,
    ) -> std::result::Result<Option<MatchEvent>, serde_json::Error> {
        Ok(self
            .match_events()?
            .into_iter()
            .rev()
            .find(|e| e.defendant_id() == defendant_id))
    }
}

/// Repository for case streams.
pub struct CaseStreamRepository {
    event_store: Arc<dyn EventStore>,
}

impl CaseStreamRepository {
    pub fn new(event_store: Arc<dyn EventStore>) -> Self {
        Self { event_store }
    }

    /// Load a case's full history.
    pub async fn load(&self, case_id: Uuid) -> Result<CaseStream> {
        let pages = self.event_store.get(CASE_DOMAIN, case_id).await?;
        Ok(CaseStream { case_id, pages })
    }

    /// Current version of a case stream without loading it.
    pub async fn next_version(&self, case_id: Uuid) -> Result<u32> {
        self.event_store.get_next_sequence(CASE_DOMAIN, case_id).await
    }

    /// Append events at `expected_version`.
    ///
    /// Fails with a sequence conflict if the stream moved since the version
    /// was read.
    pub async fn append(
        &self,
        case_id: Uuid,
        expected_version: u32,
        events: &[MatchEvent],
        correlation_id: &str,
    ) -> Result<Vec<EventPage>> {
        let pages = events
            .iter()
            .zip(expected_version..)
            .map(|(event, sequence)| event.to_page(sequence))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        self.event_store
            .add(CASE_DOMAIN, case_id, pages.clone(), correlation_id)
            .await?;
        Ok(pages)
    }
}
