//! Match defendant command handler.
//!
//! Receives a match command, reads the case stream version, runs the
//! escalation and records the outcome. A sequence conflict on append means
//! another writer moved the case first; the whole attempt is re-run against
//! the new version.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use backon::Retryable;
use tracing::{info, warn};

use super::emitter::OutcomeEmitter;
use crate::interfaces::{EventStore, SearchError, StorageError};
use crate::model::{DefendantObservation, EventPage, Outcome, Resolution, RunStats};
use crate::repository::CaseStreamRepository;
use crate::search::Resolver;
use crate::utils::retry::{
    conflict_backoff, is_retryable_search, is_retryable_storage, DEFAULT_CONFLICT_RETRIES,
};

/// Command: resolve one observed defendant and record the result.
#[derive(Debug, Clone)]
pub struct MatchDefendant {
    pub observation: DefendantObservation,
    pub correlation_id: String,
}

impl MatchDefendant {
    pub fn new(observation: DefendantObservation, correlation_id: impl Into<String>) -> Self {
        Self {
            observation,
            correlation_id: correlation_id.into(),
        }
    }
}

/// Result of a handled match command.
#[derive(Debug, Clone)]
pub struct HandledMatch {
    pub outcome: Outcome,
    pub stats: RunStats,
    /// The event appended, if the outcome produced one.
    pub recorded: Option<EventPage>,
    /// Attempts made, including the successful one.
    pub attempts: u32,
}

/// Errors from handling a match command.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Resolution exceeded run deadline of {0:?}")]
    Timeout(Duration),
}

impl MatchError {
    /// Only sequence conflicts are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            MatchError::Storage(e) => is_retryable_storage(e),
            MatchError::Search(e) => is_retryable_search(e),
            MatchError::Timeout(_) => false,
        }
    }
}

/// Handles [`MatchDefendant`] commands.
pub struct MatchDefendantHandler {
    resolver: Arc<Resolver>,
    repo: Arc<CaseStreamRepository>,
    emitter: OutcomeEmitter,
    run_timeout: Option<Duration>,
    max_conflict_retries: usize,
}

impl MatchDefendantHandler {
    /// The run deadline is taken from the resolver's matching limits.
    pub fn new(resolver: Arc<Resolver>, event_store: Arc<dyn EventStore>) -> Self {
        let repo = Arc::new(CaseStreamRepository::new(event_store));
        let run_timeout = resolver.limits().run_timeout();
        Self {
            resolver,
            emitter: OutcomeEmitter::new(repo.clone()),
            repo,
            run_timeout,
            max_conflict_retries: DEFAULT_CONFLICT_RETRIES,
        }
    }

    /// Override the run deadline. `None` disables it.
    pub fn with_run_timeout(mut self, run_timeout: Option<Duration>) -> Self {
        self.run_timeout = run_timeout;
        self
    }

    pub fn with_max_conflict_retries(mut self, retries: usize) -> Self {
        self.max_conflict_retries = retries;
        self
    }

    pub async fn handle(&self, cmd: &MatchDefendant) -> Result<HandledMatch, MatchError> {
        let attempts = AtomicU32::new(0);
        let obs = &cmd.observation;

        let (resolution, recorded) = (|| async {
            attempts.fetch_add(1, Ordering::Relaxed);
            self.attempt(cmd).await
        })
        .retry(conflict_backoff(self.max_conflict_retries))
        .when(|e: &MatchError| e.is_retryable())
        .notify(|err: &MatchError, dur: Duration| {
            warn!(
                case_id = %obs.case_id,
                defendant_id = %obs.defendant_id,
                error = %err,
                delay = ?dur,
                "Case stream moved during match, retrying"
            );
        })
        .await?;

        let attempts = attempts.load(Ordering::Relaxed);
        info!(
            case_id = %obs.case_id,
            defendant_id = %obs.defendant_id,
            correlation_id = %cmd.correlation_id,
            outcome = resolution.outcome.kind(),
            attempts,
            "Match command handled"
        );

        Ok(HandledMatch {
            outcome: resolution.outcome,
            stats: resolution.stats,
            recorded,
            attempts,
        })
    }

    async fn attempt(
        &self,
        cmd: &MatchDefendant,
    ) -> Result<(Resolution, Option<EventPage>), MatchError> {
        let obs = &cmd.observation;
        let version = self.repo.next_version(obs.case_id).await?;

        let resolution = match self.run_timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.resolver.resolve(obs))
                .await
                .map_err(|_| MatchError::Timeout(deadline))??,
            None => self.resolver.resolve(obs).await?,
        };

        let recorded = self
            .emitter
            .emit(obs, &resolution.outcome, version, &cmd.correlation_id)
            .await?;

        Ok((resolution, recorded))
    }
}
