//! Limits for the search escalation.

use std::time::Duration;

use serde::Deserialize;

/// Page size sent on every search call.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Default maximum pages fetched for one stage.
pub const DEFAULT_MAX_PAGES_PER_STAGE: u32 = 20;

/// Default maximum pages fetched across all stages of one run.
pub const DEFAULT_MAX_PAGES_PER_RUN: u32 = 100;

/// Default deadline for a whole resolution run, in seconds.
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 120;

/// Search escalation limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Results per page. Default: 25.
    pub page_size: u32,

    /// Hard cap on page calls within one stage. Default: 20.
    pub max_pages_per_stage: u32,

    /// Hard cap on page calls across a run. Default: 100.
    ///
    /// Once reached, no further stage starts.
    pub max_pages_per_run: u32,

    /// Deadline for one run in seconds; 0 disables it. Default: 120.
    pub run_timeout_secs: u64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages_per_stage: DEFAULT_MAX_PAGES_PER_STAGE,
            max_pages_per_run: DEFAULT_MAX_PAGES_PER_RUN,
            run_timeout_secs: DEFAULT_RUN_TIMEOUT_SECS,
        }
    }
}

impl MatchingConfig {
    pub fn run_timeout(&self) -> Option<Duration> {
        (self.run_timeout_secs > 0).then(|| Duration::from_secs(self.run_timeout_secs))
    }

    /// Copy with every limit raised to at least 1.
    pub fn normalized(&self) -> Self {
        Self {
            page_size: self.page_size.max(1),
            max_pages_per_stage: self.max_pages_per_stage.max(1),
            max_pages_per_run: self.max_pages_per_run.max(1),
            run_timeout_secs: self.run_timeout_secs,
        }
    }
}
