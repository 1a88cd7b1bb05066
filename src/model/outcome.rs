//! Terminal results of a resolution run.

use super::CandidateMatch;

/// The single terminal result of one resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was searched, or every search came back empty.
    NoSearchPerformed,
    /// An exact stage returned a candidate; no later stage ran.
    ExactMatchFound(CandidateMatch),
    /// Deduplicated union of all partial stage hits, in first-seen order.
    PartialMatchesAccumulated(Vec<CandidateMatch>),
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::NoSearchPerformed => "no-search-performed",
            Outcome::ExactMatchFound(_) => "exact-match-found",
            Outcome::PartialMatchesAccumulated(_) => "partial-matches-accumulated",
        }
    }

    /// Number of candidates carried by the outcome.
    pub fn candidate_count(&self) -> usize {
        match self {
            Outcome::NoSearchPerformed => 0,
            Outcome::ExactMatchFound(_) => 1,
            Outcome::PartialMatchesAccumulated(c) => c.len(),
        }
    }
}

/// Bookkeeping for one run, reported alongside the outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Stages that issued at least one page call, in execution order.
    pub stages_run: Vec<&'static str>,
    /// Stages skipped because a required attribute was blank.
    pub stages_skipped: Vec<&'static str>,
    pub pages_fetched: u32,
    /// A per-stage or per-run page cap stopped paging early.
    pub capped: bool,
}

/// Outcome of a run together with its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub stats: RunStats,
}
