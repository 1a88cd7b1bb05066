//! Unified search service configuration.

use std::time::Duration;

use serde::Deserialize;

/// Header carrying the user identity on search calls.
pub const DEFAULT_USER_HEADER: &str = "CJSCPPUID";

/// Unified search service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL; exact and partial queries go to `{base_url}/defendants/{exact|partial}`.
    pub base_url: String,
    /// System identity for privileged (as-admin) calls.
    pub admin_user_id: Option<String>,
    /// Identity for normal calls.
    pub user_id: Option<String>,
    /// Header that carries the identity.
    pub user_header: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/unifiedsearch".to_string(),
            admin_user_id: None,
            user_id: None,
            user_header: DEFAULT_USER_HEADER.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
