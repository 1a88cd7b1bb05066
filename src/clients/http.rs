//! HTTP client for the unified search service.
//!
//! GETs `{base_url}/defendants/exact` or `{base_url}/defendants/partial` with
//! the query parameters as the query string. The identity header is the
//! configured admin user for as-admin calls and the service user otherwise.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, warn};

use crate::config::SearchConfig;
use crate::interfaces::search_client::Result;
use crate::interfaces::{SearchClient, SearchError, SearchMode};
use crate::model::SearchPage;
use crate::search::{QueryParameters, StageKind};

/// Unified search client over HTTP.
///
/// Performs no retries; the caller decides what to do with a failure.
pub struct HttpSearchClient {
    client: Client,
    config: SearchConfig,
}

impl HttpSearchClient {
    /// Create a new client with the configured request timeout.
    pub fn new(config: SearchConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(SearchError::Unavailable(
                "search base_url not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, kind: StageKind) -> String {
        format!(
            "{}/defendants/{}",
            self.config.base_url.trim_end_matches('/'),
            kind.as_str()
        )
    }

    fn identity(&self, mode: SearchMode) -> Option<&str> {
        match mode {
            SearchMode::AsAdmin => self.config.admin_user_id.as_deref(),
            SearchMode::Normal => self.config.user_id.as_deref(),
        }
    }

    /// Map a non-success status to an error.
    fn status_error(status: StatusCode, body: String) -> SearchError {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            SearchError::AccessDenied {
                status: status.as_u16(),
            }
        } else {
            SearchError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            }
        }
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn fetch(&self, params: &QueryParameters, mode: SearchMode) -> Result<SearchPage> {
        let url = self.endpoint(params.kind);

        let mut request = self.client.get(&url).query(params);
        if let Some(user) = self.identity(mode) {
            request = request.header(self.config.user_header.as_str(), user);
        } else if mode == SearchMode::AsAdmin {
            warn!("No admin_user_id configured; as-admin search sent without identity");
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            let page: SearchPage = serde_json::from_slice(&body)?;
            debug!(
                url = %url,
                start_from = params.start_from,
                total_results = page.total_results,
                "Search page received"
            );
            Ok(page)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(url = %url, status = %status, "Search request failed");
            Err(Self::status_error(status, body))
        }
    }
}
