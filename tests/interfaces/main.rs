//! Interface tests for casematch using Cucumber.
//!
//! Resolution scenarios drive the match handler against a scripted search
//! client. EventStore scenarios run against the backend selected with
//! `STORAGE_BACKEND`:
//!
//! ```bash
//! # In-memory (default)
//! cargo test --test interfaces --features test-utils
//!
//! # SQLite in a temp directory
//! STORAGE_BACKEND=sqlite cargo test --test interfaces --features test-utils,sqlite
//! ```

mod backend;
mod steps;

use cucumber::World;
use steps::event_store::EventStoreWorld;
use steps::resolution::ResolutionWorld;

#[tokio::main]
async fn main() {
    println!("\n=== Running Resolution Interface Tests ===\n");
    ResolutionWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/resolution.feature")
        .await;

    println!("\n=== Running EventStore Interface Tests ===\n");
    EventStoreWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/event_store.feature")
        .await;
}
