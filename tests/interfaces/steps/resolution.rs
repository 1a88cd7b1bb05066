//! Resolution step definitions.
//!
//! Each scenario scripts per-stage pages on a mock search client, runs the
//! match handler once and inspects the calls made and the event recorded.

use std::sync::Arc;

use chrono::NaiveDate;
use cucumber::{given, then, when, World};
use uuid::Uuid;

use casematch::clients::{MockFailure, MockSearchClient};
use casematch::config::MatchingConfig;
use casematch::model::{
    CaseResult, DefendantObservation, DefendantResult, MatchEvent, Outcome, PersonDetails,
    SearchPage, CASE_DOMAIN,
};
use casematch::search::{Resolver, SearchStage, STAGES};
use casematch::services::{HandledMatch, MatchDefendant, MatchDefendantHandler, MatchError};
use casematch::storage::{EventStore, MemoryEventStore};

/// Test context for resolution scenarios.
#[derive(World)]
#[world(init = Self::new)]
pub struct ResolutionWorld {
    client: Arc<MockSearchClient>,
    store: Arc<MemoryEventStore>,
    observation: DefendantObservation,
    /// Identities scripted per stage, in stage-table order once sorted.
    scripted: Vec<(usize, Vec<(Uuid, Uuid)>)>,
    result: Option<Result<HandledMatch, MatchError>>,
}

impl std::fmt::Debug for ResolutionWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionWorld")
            .field("observation", &self.observation)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl ResolutionWorld {
    fn new() -> Self {
        Self {
            client: Arc::new(MockSearchClient::new()),
            store: Arc::new(MemoryEventStore::new()),
            observation: DefendantObservation::new(Uuid::new_v4(), Uuid::new_v4()),
            scripted: Vec::new(),
            result: None,
        }
    }

    fn stage(name: &str) -> (usize, &'static SearchStage) {
        STAGES
            .iter()
            .enumerate()
            .find(|(_, s)| s.name == name)
            .unwrap_or_else(|| panic!("Unknown stage {name}"))
    }

    fn handled(&self) -> &HandledMatch {
        match self.result.as_ref().expect("Defendant was not matched") {
            Ok(handled) => handled,
            Err(e) => panic!("Match failed: {e}"),
        }
    }

    /// Script `total` results for a stage, split into full pages.
    async fn script_results(&mut self, name: &str, total: u32, defendants: Vec<(Uuid, Uuid)>) {
        let (index, stage) = Self::stage(name);
        let page_size = MatchingConfig::default().page_size as usize;
        let pages = defendants
            .chunks(page_size)
            .map(|chunk| SearchPage {
                total_results: total,
                cases: chunk
                    .iter()
                    .map(|(case_id, defendant_id)| CaseResult {
                        case_reference: None,
                        prosecution_case_id: *case_id,
                        defendants: vec![DefendantResult::with_id(*defendant_id)],
                    })
                    .collect(),
            })
            .collect();
        self.client.script_stage(stage, pages).await;
        self.scripted.push((index, defendants));
    }

    fn fresh(count: u32) -> Vec<(Uuid, Uuid)> {
        (0..count).map(|_| (Uuid::new_v4(), Uuid::new_v4())).collect()
    }

    fn expected_partials(&self) -> Vec<(Uuid, Uuid)> {
        let mut scripted = self.scripted.clone();
        scripted.sort_by_key(|(index, _)| *index);
        let mut seen = std::collections::HashSet::new();
        scripted
            .into_iter()
            .filter(|(index, _)| STAGES[*index].name.starts_with("partial"))
            .flat_map(|(_, ids)| ids)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

// --- Given steps ---

#[given(expr = "a defendant with PNC {string} and no person details")]
async fn given_defendant_without_person(world: &mut ResolutionWorld, pnc: String) {
    world.observation = DefendantObservation::new(Uuid::new_v4(), Uuid::new_v4())
        .with_pnc_id(pnc)
        .with_proceedings_concluded(false)
        .with_crown_or_magistrates(true);
}

#[given(expr = "a defendant with PNC {string} and person details")]
async fn given_defendant_with_person(world: &mut ResolutionWorld, pnc: String) {
    world.observation = DefendantObservation::new(Uuid::new_v4(), Uuid::new_v4())
        .with_pnc_id(pnc)
        .with_proceedings_concluded(false)
        .with_crown_or_magistrates(true)
        .with_person(PersonDetails {
            first_name: Some("Ada".to_string()),
            middle_name: None,
            last_name: Some("Lovelace".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 12, 10),
            address_line1: Some("1 Test Street".to_string()),
        });
}

#[given(expr = "stage {string} returns {int} candidate")]
#[given(expr = "stage {string} returns {int} candidates")]
async fn given_stage_returns(world: &mut ResolutionWorld, stage: String, count: u32) {
    world
        .script_results(&stage, count, ResolutionWorld::fresh(count))
        .await;
}

#[given(expr = "stage {string} reports {int} results")]
async fn given_stage_reports(world: &mut ResolutionWorld, stage: String, total: u32) {
    world
        .script_results(&stage, total, ResolutionWorld::fresh(total))
        .await;
}

#[given(expr = "stages {string} and {string} both return the same {int} candidates")]
async fn given_overlapping_stages(
    world: &mut ResolutionWorld,
    first: String,
    second: String,
    count: u32,
) {
    let shared = ResolutionWorld::fresh(count);
    world.script_results(&first, count, shared.clone()).await;
    world.script_results(&second, count, shared).await;
}

#[given(expr = "the search service denies access on call {int}")]
async fn given_access_denied(world: &mut ResolutionWorld, call: usize) {
    world
        .client
        .set_fail_on_call(call.saturating_sub(1), MockFailure::AccessDenied)
        .await;
}

// --- When steps ---

#[when("the defendant is matched")]
async fn when_matched(world: &mut ResolutionWorld) {
    let resolver = Arc::new(Resolver::new(
        world.client.clone(),
        MatchingConfig::default(),
    ));
    let handler = MatchDefendantHandler::new(resolver, world.store.clone());
    let cmd = MatchDefendant::new(world.observation.clone(), "interface-test");
    world.result = Some(handler.handle(&cmd).await);
}

// --- Then steps ---

#[then(expr = "the outcome is {string}")]
async fn then_outcome(world: &mut ResolutionWorld, kind: String) {
    assert_eq!(world.handled().outcome.kind(), kind);
}

#[then(expr = "{int} search call is made")]
#[then(expr = "{int} search calls are made")]
async fn then_call_count(world: &mut ResolutionWorld, count: usize) {
    assert_eq!(world.client.call_count().await, count);
}

#[then("no search calls are made")]
async fn then_no_calls(world: &mut ResolutionWorld) {
    assert_eq!(world.client.call_count().await, 0);
}

#[then(expr = "every search call is made as admin")]
async fn then_admin_calls(world: &mut ResolutionWorld) {
    for call in world.client.calls().await {
        assert_eq!(call.mode, casematch::interfaces::SearchMode::AsAdmin);
        assert!(!call.params.proceedings_concluded);
        assert!(call.params.crown_or_magistrates);
    }
}

#[then(expr = "the stages run are {string}")]
async fn then_stages_run(world: &mut ResolutionWorld, stages: String) {
    let expected: Vec<&str> = stages.split(',').map(str::trim).collect();
    assert_eq!(world.handled().stats.stages_run, expected);
}

#[then(expr = "stage {string} is skipped")]
async fn then_stage_skipped(world: &mut ResolutionWorld, stage: String) {
    assert!(
        world
            .handled()
            .stats
            .stages_skipped
            .iter()
            .any(|s| *s == stage),
        "{stage} was not skipped: {:?}",
        world.handled().stats.stages_skipped
    );
}

#[then(expr = "stage {string} is queried at offsets {string}")]
async fn then_offsets(world: &mut ResolutionWorld, stage: String, offsets: String) {
    let (_, stage) = ResolutionWorld::stage(&stage);
    let expected: Vec<u32> = offsets
        .split(',')
        .map(|o| o.trim().parse().expect("offset"))
        .collect();
    let got: Vec<u32> = world
        .client
        .calls()
        .await
        .into_iter()
        .filter(|c| c.params.kind == stage.kind && c.params.attributes() == stage.attributes)
        .map(|c| c.params.start_from)
        .collect();
    assert_eq!(got, expected);
}

#[then(expr = "the accumulated candidates are the scripted partial hits in stage order")]
async fn then_partials_in_order(world: &mut ResolutionWorld) {
    let expected = world.expected_partials();
    match &world.handled().outcome {
        Outcome::PartialMatchesAccumulated(candidates) => {
            let got: Vec<_> = candidates.iter().map(|c| c.identity()).collect();
            assert_eq!(got, expected);
        }
        other => panic!("Expected partial matches, got {other:?}"),
    }
}

#[then(expr = "{int} candidates are accumulated")]
async fn then_candidate_count(world: &mut ResolutionWorld, count: usize) {
    assert_eq!(world.handled().outcome.candidate_count(), count);
}

#[then(expr = "one {string} event is recorded with {int} candidate(s)")]
async fn then_event_recorded(world: &mut ResolutionWorld, event_type: String, count: usize) {
    let events = world
        .store
        .get(CASE_DOMAIN, world.observation.case_id)
        .await
        .expect("Failed to read case stream");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, event_type);

    let event = MatchEvent::from_page(&events[0])
        .expect("Failed to decode event")
        .expect("Not a match event");
    assert_eq!(event.defendant_id(), world.observation.defendant_id);
    let carried = match event {
        MatchEvent::ExactMatchFound { .. } => 1,
        MatchEvent::PartialMatchesStored { candidates, .. } => candidates.len(),
    };
    assert_eq!(carried, count);
}

#[then("no event is recorded")]
async fn then_no_event(world: &mut ResolutionWorld) {
    let events = world
        .store
        .get(CASE_DOMAIN, world.observation.case_id)
        .await
        .expect("Failed to read case stream");
    assert!(events.is_empty());
}

#[then("the match fails with access denied")]
async fn then_access_denied(world: &mut ResolutionWorld) {
    match world.result.as_ref().expect("Defendant was not matched") {
        Err(MatchError::Search(casematch::interfaces::SearchError::AccessDenied { .. })) => {}
        other => panic!("Expected access denied, got {other:?}"),
    }
}
