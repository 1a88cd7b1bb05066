//! SQLite implementations of storage interfaces.

mod event_store;

pub use event_store::SqliteEventStore;
