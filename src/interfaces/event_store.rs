//! Event storage interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::EventPage;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Sequence conflict: expected {expected}, got {actual}")]
    SequenceConflict { expected: u32, actual: u32 },

    #[error("Events are not contiguous: {previous} followed by {next}")]
    NonContiguous { previous: u32, next: u32 },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unknown storage type: {0}")]
    UnknownStorageType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// A concurrent writer moved the stream on; the whole command may be retried.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::SequenceConflict { .. })
    }
}

/// Interface for event persistence.
///
/// Streams are keyed by `(domain, root)`. Appends are guarded: the first
/// event of a batch must carry the stream's next sequence and the batch must
/// be contiguous, otherwise the append fails with
/// [`StorageError::SequenceConflict`] and nothing is written.
///
/// Implementations:
/// - `SqliteEventStore`: SQLite storage
/// - `MockEventStore`: In-memory storage for standalone runs and tests
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append events to a stream.
    ///
    /// The correlation_id links the events to the command that produced them.
    async fn add(
        &self,
        domain: &str,
        root: Uuid,
        events: Vec<EventPage>,
        correlation_id: &str,
    ) -> Result<()>;

    /// Retrieve all events for a stream.
    async fn get(&self, domain: &str, root: Uuid) -> Result<Vec<EventPage>>;

    /// Retrieve events from sequence N onwards.
    async fn get_from(&self, domain: &str, root: Uuid, from: u32) -> Result<Vec<EventPage>>;

    /// List all stream roots in a domain.
    async fn list_roots(&self, domain: &str) -> Result<Vec<Uuid>>;

    /// Get the next sequence number for a stream (0 for a new stream).
    async fn get_next_sequence(&self, domain: &str, root: Uuid) -> Result<u32>;
}
