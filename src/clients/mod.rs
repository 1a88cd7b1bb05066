//! Unified search service clients.

pub mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use http::HttpSearchClient;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockFailure, MockSearchClient, RecordedCall};
