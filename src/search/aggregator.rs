//! Candidate Aggregator: order-preserving dedup by (case, defendant).

use std::collections::HashSet;

use uuid::Uuid;

use crate::model::CandidateMatch;

/// Collects candidates across pages and stages of one run.
///
/// The first sighting of an identity wins; later sightings are dropped.
#[derive(Debug, Default)]
pub struct CandidateAggregator {
    seen: HashSet<(Uuid, Uuid)>,
    candidates: Vec<CandidateMatch>,
}

impl CandidateAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate. Returns false if its identity was already present.
    pub fn add(&mut self, candidate: CandidateMatch) -> bool {
        if !self.seen.insert(candidate.identity()) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    pub fn all(&self) -> &[CandidateMatch] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<CandidateMatch> {
        self.candidates
    }
}
