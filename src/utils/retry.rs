//! Retry utilities: backoff builders and retryable error classification.
//!
//! Uses `backon` for exponential backoff with jitter.

use std::time::Duration;

use backon::ExponentialBuilder;

use crate::interfaces::{SearchError, StorageError};

/// Maximum re-attempts after a sequence conflict.
pub const DEFAULT_CONFLICT_RETRIES: usize = 10;

/// Backoff for re-running a match after a sequence conflict.
///
/// - Min delay: 10ms
/// - Max delay: 2s
/// - Max attempts: `max_times` (default [`DEFAULT_CONFLICT_RETRIES`])
/// - Jitter enabled
pub fn conflict_backoff(max_times: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(10))
        .with_max_delay(Duration::from_secs(2))
        .with_max_times(max_times)
        .with_jitter()
}

/// A storage error is worth retrying only when another writer moved the
/// stream first.
pub fn is_retryable_storage(err: &StorageError) -> bool {
    err.is_conflict()
}

/// Search failures are never retried; the run fails as a whole.
pub fn is_retryable_search(_err: &SearchError) -> bool {
    false
}
