//! Stage Sequencer: runs the escalation for one observation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::aggregator::CandidateAggregator;
use super::pagination::{has_more_pages, offset_for};
use super::query::{self, QueryParameters};
use super::stages::{SearchStage, StageKind, STAGES};
use crate::config::MatchingConfig;
use crate::interfaces::search_client::Result;
use crate::interfaces::{SearchClient, SearchMode};
use crate::model::{CandidateMatch, DefendantObservation, Outcome, Resolution, RunStats};

/// Resolves observed defendants against the unified search index.
///
/// Holds no per-run state: every call to [`Resolver::resolve`] starts from a
/// fresh aggregator, so one resolver can be shared across concurrent commands.
/// Within a run, calls are issued strictly one at a time.
pub struct Resolver {
    client: Arc<dyn SearchClient>,
    stages: Vec<SearchStage>,
    limits: MatchingConfig,
}

impl Resolver {
    /// Create a resolver over the standard [`STAGES`] table.
    pub fn new(client: Arc<dyn SearchClient>, limits: MatchingConfig) -> Self {
        Self {
            client,
            stages: STAGES.to_vec(),
            limits: limits.normalized(),
        }
    }

    /// Replace the stage table.
    pub fn with_stages(mut self, stages: Vec<SearchStage>) -> Self {
        self.stages = stages;
        self
    }

    pub fn limits(&self) -> &MatchingConfig {
        &self.limits
    }

    /// Run the escalation and return its outcome.
    ///
    /// A search failure aborts the run; no partial outcome is produced.
    pub async fn resolve(&self, observation: &DefendantObservation) -> Result<Resolution> {
        let mut stats = RunStats::default();

        if !observation.is_searchable() {
            debug!(
                defendant_id = %observation.defendant_id,
                "No person details, skipping search"
            );
            return Ok(Resolution {
                outcome: Outcome::NoSearchPerformed,
                stats,
            });
        }

        let mut aggregator = CandidateAggregator::new();

        for stage in &self.stages {
            let Some(params) = query::build(observation, stage, self.limits.page_size) else {
                debug!(stage = stage.name, "Required attribute blank, skipping stage");
                stats.stages_skipped.push(stage.name);
                continue;
            };

            if stats.pages_fetched >= self.limits.max_pages_per_run {
                warn!(
                    defendant_id = %observation.defendant_id,
                    stage = stage.name,
                    pages_fetched = stats.pages_fetched,
                    "Run page cap reached, not starting further stages"
                );
                stats.capped = true;
                break;
            }

            let found = self.run_stage(stage, params, &mut stats).await?;

            match stage.kind {
                StageKind::Exact => {
                    if let Some(matched) = found.into_iter().next() {
                        info!(
                            defendant_id = %observation.defendant_id,
                            stage = stage.name,
                            case_id = %matched.prosecution_case_id,
                            matched_defendant_id = %matched.defendant.defendant_id,
                            "Exact match found"
                        );
                        return Ok(Resolution {
                            outcome: Outcome::ExactMatchFound(matched),
                            stats,
                        });
                    }
                }
                StageKind::Partial => {
                    for candidate in found {
                        aggregator.add(candidate);
                    }
                }
            }
        }

        let outcome = if aggregator.is_empty() {
            Outcome::NoSearchPerformed
        } else {
            Outcome::PartialMatchesAccumulated(aggregator.into_candidates())
        };

        info!(
            defendant_id = %observation.defendant_id,
            outcome = outcome.kind(),
            candidates = outcome.candidate_count(),
            pages_fetched = stats.pages_fetched,
            "Resolution complete"
        );

        Ok(Resolution { outcome, stats })
    }

    /// Page through one stage.
    ///
    /// Exact stages return as soon as a page yields a candidate. Paging stops
    /// on an empty page, when the reported total is consumed, or at a cap.
    async fn run_stage(
        &self,
        stage: &SearchStage,
        first: QueryParameters,
        stats: &mut RunStats,
    ) -> Result<Vec<CandidateMatch>> {
        let page_size = self.limits.page_size;
        let mut found = Vec::new();
        let mut pages_fetched = 0u32;

        stats.stages_run.push(stage.name);

        loop {
            let params = first.at_offset(offset_for(pages_fetched, page_size));
            let page = self.client.fetch(&params, SearchMode::AsAdmin).await?;
            pages_fetched += 1;
            stats.pages_fetched += 1;

            let total_results = page.total_results;
            debug!(
                stage = stage.name,
                kind = stage.kind.as_str(),
                start_from = params.start_from,
                total_results,
                "Fetched search page"
            );

            if page.is_empty() {
                break;
            }
            found.extend(page.into_candidates(stage.name));

            if stage.kind == StageKind::Exact {
                break;
            }
            if !has_more_pages(page_size, total_results, pages_fetched) {
                break;
            }
            if pages_fetched >= self.limits.max_pages_per_stage {
                warn!(stage = stage.name, pages_fetched, total_results, "Stage page cap reached");
                stats.capped = true;
                break;
            }
            if stats.pages_fetched >= self.limits.max_pages_per_run {
                warn!(stage = stage.name, pages_fetched = stats.pages_fetched, "Run page cap reached");
                stats.capped = true;
                break;
            }
        }

        Ok(found)
    }
}
