//! Unified search client interface.

use async_trait::async_trait;

use crate::model::SearchPage;
use crate::search::QueryParameters;

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while querying the unified search service.
///
/// None of these are retried by the client; they abort the current
/// resolution run.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Access denied by search service (HTTP {status})")]
    AccessDenied { status: u16 },

    #[error("Search service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Search service unavailable: {0}")]
    Unavailable(String),
}

/// Identity under which a query is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Privileged system identity, used for the unified search index.
    AsAdmin,
    /// The configured service user, used for other lookups.
    Normal,
}

/// Interface for fetching one page of unified search results.
///
/// Implementations:
/// - `HttpSearchClient`: reqwest client for the unified search REST endpoint
/// - `MockSearchClient`: scripted pages for tests
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetch the page starting at `params.start_from`.
    async fn fetch(&self, params: &QueryParameters, mode: SearchMode) -> Result<SearchPage>;
}
