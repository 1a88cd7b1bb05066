//! Repository layer over the event store.

pub mod case_stream;

pub use case_stream::{CaseStream, CaseStreamRepository};
