//! casematch-resolve: resolve one observed defendant.
//!
//! Reads a defendant observation (JSON) from the path given on the command
//! line, runs the search escalation against the configured unified search
//! service and records the outcome on the case stream.
//!
//! ## Usage
//!
//! ```text
//! casematch-resolve [--config casematch.yaml] observation.json
//! ```
//!
//! ## Configuration
//!
//! - `CASEMATCH_CONFIG`: path to an extra YAML config file
//! - `CASEMATCH__SEARCH__BASE_URL`: unified search base URL
//! - `CASEMATCH__SEARCH__ADMIN_USER_ID`: identity used for searches
//! - `CASEMATCH__STORAGE__TYPE`: `memory` or `sqlite`
//! - `CASEMATCH_LOG`: log filter (default `info`)

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use casematch::clients::HttpSearchClient;
use casematch::config::Config;
use casematch::model::DefendantObservation;
use casematch::search::Resolver;
use casematch::services::{MatchDefendant, MatchDefendantHandler};
use casematch::storage::init_storage;
use casematch::utils::bootstrap::{init_tracing, parse_config_path, positional_args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = parse_config_path();
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let observation_path = positional_args()
        .into_iter()
        .next()
        .ok_or("usage: casematch-resolve [--config <file>] <observation.json>")?;

    let raw = std::fs::read(&observation_path)?;
    let observation: DefendantObservation = serde_json::from_slice(&raw)?;

    info!(
        case_id = %observation.case_id,
        defendant_id = %observation.defendant_id,
        "Resolving defendant"
    );

    let event_store = init_storage(&config.storage).await?;
    info!("Storage initialized");

    let client = Arc::new(HttpSearchClient::new(config.search.clone())?);
    let resolver = Arc::new(Resolver::new(client, config.matching.clone()));
    let handler = MatchDefendantHandler::new(resolver, event_store);

    let cmd = MatchDefendant::new(observation, Uuid::new_v4().to_string());
    let handled = handler.handle(&cmd).await.map_err(|e| {
        error!(error = %e, "Match failed");
        e
    })?;

    let summary = serde_json::json!({
        "outcome": handled.outcome.kind(),
        "candidates": handled.outcome.candidate_count(),
        "stagesRun": handled.stats.stages_run,
        "stagesSkipped": handled.stats.stages_skipped,
        "pagesFetched": handled.stats.pages_fetched,
        "capped": handled.stats.capped,
        "attempts": handled.attempts,
        "recorded": handled.recorded,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
