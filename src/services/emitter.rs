//! Outcome Emitter: turns a run outcome into at most one case event.

use std::sync::Arc;

use tracing::{debug, info};

use crate::model::{DefendantObservation, EventPage, MatchEvent, Outcome};
use crate::repository::CaseStreamRepository;
use crate::storage::Result;

/// Appends the event for a run outcome to the defendant's case stream.
pub struct OutcomeEmitter {
    repo: Arc<CaseStreamRepository>,
}

impl OutcomeEmitter {
    pub fn new(repo: Arc<CaseStreamRepository>) -> Self {
        Self { repo }
    }

    /// The event an outcome produces, if any.
    ///
    /// Partial matches become one event carrying the whole candidate list.
    pub fn to_event(observation: &DefendantObservation, outcome: &Outcome) -> Option<MatchEvent> {
        match outcome {
            Outcome::NoSearchPerformed => None,
            Outcome::ExactMatchFound(candidate) => Some(MatchEvent::ExactMatchFound {
                case_id: observation.case_id,
                defendant_id: observation.defendant_id,
                matched: candidate.clone().into(),
            }),
            Outcome::PartialMatchesAccumulated(candidates) => {
                Some(MatchEvent::PartialMatchesStored {
                    case_id: observation.case_id,
                    defendant_id: observation.defendant_id,
                    candidates: candidates.iter().cloned().map(Into::into).collect(),
                })
            }
        }
    }

    /// Append the outcome's event at `expected_version`.
    ///
    /// `NoSearchPerformed` appends nothing and returns `Ok(None)`. A version
    /// conflict is returned to the caller untouched.
    pub async fn emit(
        &self,
        observation: &DefendantObservation,
        outcome: &Outcome,
        expected_version: u32,
        correlation_id: &str,
    ) -> Result<Option<EventPage>> {
        let Some(event) = Self::to_event(observation, outcome) else {
            debug!(
                case_id = %observation.case_id,
                defendant_id = %observation.defendant_id,
                "No match outcome to record"
            );
            return Ok(None);
        };

        let mut pages = self
            .repo
            .append(observation.case_id, expected_version, &[event], correlation_id)
            .await?;

        let page = pages.pop();
        if let Some(ref p) = page {
            info!(
                case_id = %observation.case_id,
                defendant_id = %observation.defendant_id,
                event_type = %p.event_type,
                sequence = p.sequence,
                "Match outcome recorded"
            );
        }
        Ok(page)
    }
}
