//! Scripted search client for testing.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::interfaces::search_client::Result;
use crate::interfaces::{SearchClient, SearchError, SearchMode};
use crate::model::SearchPage;
use crate::search::{Attribute, QueryParameters, SearchStage, StageKind};

/// Failure injected by [`MockSearchClient::set_fail_on_call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    AccessDenied,
    Unavailable,
}

/// One call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub params: QueryParameters,
    pub mode: SearchMode,
}

struct Script {
    kind: StageKind,
    attributes: Vec<Attribute>,
    pages: Vec<SearchPage>,
}

/// Search client answering from scripted pages.
///
/// Queries are matched on kind plus the exact set of identifying attributes
/// present; the page returned is `pages[start_from / page_size]`. Unscripted
/// queries and offsets past the script return an empty page.
#[derive(Default)]
pub struct MockSearchClient {
    scripts: RwLock<Vec<Script>>,
    calls: RwLock<Vec<RecordedCall>>,
    fail_on_call: RwLock<Option<(usize, MockFailure)>>,
    delay: RwLock<Option<Duration>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the pages returned for queries shaped like `stage`.
    pub async fn script_stage(&self, stage: &SearchStage, pages: Vec<SearchPage>) {
        self.script(stage.kind, stage.attributes, pages).await;
    }

    pub async fn script(&self, kind: StageKind, attributes: &[Attribute], pages: Vec<SearchPage>) {
        let mut scripts = self.scripts.write().await;
        scripts.retain(|s| !(s.kind == kind && s.attributes == attributes));
        scripts.push(Script {
            kind,
            attributes: attributes.to_vec(),
            pages,
        });
    }

    /// Fail the zero-based `call_index`-th call.
    pub async fn set_fail_on_call(&self, call_index: usize, failure: MockFailure) {
        *self.fail_on_call.write().await = Some((call_index, failure));
    }

    /// Hold every response for `delay` before answering.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn fetch(&self, params: &QueryParameters, mode: SearchMode) -> Result<SearchPage> {
        let call_index = {
            let mut calls = self.calls.write().await;
            calls.push(RecordedCall {
                params: params.clone(),
                mode,
            });
            calls.len() - 1
        };

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some((index, failure)) = *self.fail_on_call.read().await {
            if index == call_index {
                return Err(match failure {
                    MockFailure::AccessDenied => SearchError::AccessDenied { status: 403 },
                    MockFailure::Unavailable => {
                        SearchError::Unavailable("Mock search failure".to_string())
                    }
                });
            }
        }

        let attributes = params.attributes();
        let scripts = self.scripts.read().await;
        let page = scripts
            .iter()
            .find(|s| s.kind == params.kind && s.attributes == attributes)
            .and_then(|s| {
                let index = (params.start_from / params.page_size.max(1)) as usize;
                s.pages.get(index).cloned()
            })
            .unwrap_or_default();

        Ok(page)
    }
}
