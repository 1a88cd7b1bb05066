//! EventStore interface step definitions.

use chrono::Utc;
use cucumber::{given, then, when, World};
use uuid::Uuid;

use casematch::model::{EventPage, CASE_DOMAIN};
use casematch::storage::{EventStore, StorageError};

use crate::backend::{StorageBackend, StorageContext};

/// Test context for EventStore scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct EventStoreWorld {
    backend: StorageBackend,
    context: Option<StorageContext>,
    current_root: Uuid,
    last_result: Option<Result<(), StorageError>>,
}

impl EventStoreWorld {
    fn new() -> Self {
        Self {
            backend: StorageBackend::from_env(),
            context: None,
            current_root: Uuid::nil(),
            last_result: None,
        }
    }

    fn store(&self) -> &dyn EventStore {
        self.context
            .as_ref()
            .expect("Storage context not initialized")
            .event_store
            .as_ref()
    }

    fn pages(start: u32, count: u32) -> Vec<EventPage> {
        (start..start + count)
            .map(|sequence| EventPage {
                sequence,
                event_type: "test.Event".to_string(),
                payload: serde_json::json!({ "n": sequence }),
                created_at: Utc::now(),
            })
            .collect()
    }

    async fn seed_case(&mut self, count: u32) -> Uuid {
        let root = Uuid::new_v4();
        if count > 0 {
            self.store()
                .add(CASE_DOMAIN, root, Self::pages(0, count), "seed")
                .await
                .expect("Failed to seed case");
        }
        root
    }
}

// --- Background ---

#[given("an EventStore backend")]
async fn given_event_store_backend(world: &mut EventStoreWorld) {
    println!("Using backend: {}", world.backend.name());
    world.context = Some(StorageContext::new(world.backend).await);
}

// --- Given steps ---

#[given("a case with no events")]
async fn given_case_no_events(world: &mut EventStoreWorld) {
    world.current_root = world.seed_case(0).await;
}

#[given(expr = "a case with {int} event")]
#[given(expr = "a case with {int} events")]
async fn given_case_with_events(world: &mut EventStoreWorld, count: u32) {
    world.current_root = world.seed_case(count).await;
}

#[given(expr = "another case with {int} events")]
async fn given_another_case(world: &mut EventStoreWorld, count: u32) {
    world.seed_case(count).await;
}

// --- When steps ---

#[when(expr = "I append {int} event starting at sequence {int}")]
#[when(expr = "I append {int} events starting at sequence {int}")]
async fn when_append(world: &mut EventStoreWorld, count: u32, start: u32) {
    let result = world
        .store()
        .add(
            CASE_DOMAIN,
            world.current_root,
            EventStoreWorld::pages(start, count),
            "interface-test",
        )
        .await;
    world.last_result = Some(result);
}

// --- Then steps ---

#[then("the append succeeds")]
async fn then_append_succeeds(world: &mut EventStoreWorld) {
    let result = world.last_result.as_ref().expect("No append attempted");
    assert!(result.is_ok(), "Append failed: {result:?}");
}

#[then("the append fails with a sequence conflict")]
async fn then_append_conflicts(world: &mut EventStoreWorld) {
    match world.last_result.as_ref().expect("No append attempted") {
        Err(e) => assert!(e.is_conflict(), "Expected conflict, got {e}"),
        Ok(()) => panic!("Expected conflict, append succeeded"),
    }
}

#[then(expr = "the next sequence is {int}")]
async fn then_next_sequence(world: &mut EventStoreWorld, expected: u32) {
    let next = world
        .store()
        .get_next_sequence(CASE_DOMAIN, world.current_root)
        .await
        .expect("Failed to read next sequence");
    assert_eq!(next, expected);
}

#[then(expr = "the case has {int} events")]
async fn then_event_count(world: &mut EventStoreWorld, expected: usize) {
    let events = world
        .store()
        .get(CASE_DOMAIN, world.current_root)
        .await
        .expect("Failed to read case");
    assert_eq!(events.len(), expected);
    for (i, page) in events.iter().enumerate() {
        assert_eq!(page.sequence as usize, i);
    }
}

#[then(expr = "reading from sequence {int} returns {int} events")]
async fn then_read_from(world: &mut EventStoreWorld, from: u32, expected: usize) {
    let events = world
        .store()
        .get_from(CASE_DOMAIN, world.current_root, from)
        .await
        .expect("Failed to read case");
    assert_eq!(events.len(), expected);
    assert!(events.iter().all(|p| p.sequence >= from));
}

#[then(expr = "{int} cases are listed")]
async fn then_cases_listed(world: &mut EventStoreWorld, expected: usize) {
    let roots = world
        .store()
        .list_roots(CASE_DOMAIN)
        .await
        .expect("Failed to list cases");
    assert_eq!(roots.len(), expected);
}
