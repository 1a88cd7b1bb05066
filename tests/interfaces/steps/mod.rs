pub mod event_store;
pub mod resolution;
