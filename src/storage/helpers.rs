//! Shared storage helper functions.
//!
//! Append validation used by every backend so conflict semantics match.

use crate::model::EventPage;

use super::{Result, StorageError};

/// Validate a batch against the stream's next sequence.
///
/// The first event must carry `next_sequence` exactly and the rest must
/// follow without gaps. A stale first sequence is a concurrency conflict.
pub fn validate_append(events: &[EventPage], next_sequence: u32) -> Result<()> {
    let Some(first) = events.first() else {
        return Ok(());
    };

    if first.sequence != next_sequence {
        return Err(StorageError::SequenceConflict {
            expected: next_sequence,
            actual: first.sequence,
        });
    }

    for pair in events.windows(2) {
        if pair[1].sequence != pair[0].sequence + 1 {
            return Err(StorageError::NonContiguous {
                previous: pair[0].sequence,
                next: pair[1].sequence,
            });
        }
    }

    Ok(())
}
