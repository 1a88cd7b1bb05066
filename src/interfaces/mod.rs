//! Abstract interfaces for casematch components.
//!
//! These traits define the contracts for:
//! - Event storage (append-only case streams with optimistic concurrency)
//! - The unified search service (paged candidate queries)

pub mod event_store;
pub mod search_client;

pub use event_store::{EventStore, StorageError};
pub use search_client::{SearchClient, SearchError, SearchMode};
