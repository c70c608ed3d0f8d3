use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use fleetdash_client::{SummaryClient, SummarySource};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Why one source is missing from a result. Payloads are never kept here.
pub struct SourceFailure {
    pub source_key: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    Succeeded,
    PartiallySucceeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Settled outcome of one summary cycle: each requested source key is either
/// present with its full payload or listed as a failure.
pub struct SummaryResult {
    payloads: BTreeMap<String, Value>,
    failures: Vec<SourceFailure>,
}

impl SummaryResult {
    pub fn get(&self, source_key: &str) -> Option<&Value> {
        self.payloads.get(source_key)
    }

    pub fn contains(&self, source_key: &str) -> bool {
        self.payloads.contains_key(source_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.payloads.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Failures sorted by source key.
    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    pub fn failure_reason(&self, source_key: &str) -> Option<&str> {
        self.failures
            .iter()
            .find(|failure| failure.source_key == source_key)
            .map(|failure| failure.reason.as_str())
    }

    pub fn status(&self) -> ResultStatus {
        match (self.payloads.is_empty(), self.failures.is_empty()) {
            (false, true) => ResultStatus::Succeeded,
            (false, false) => ResultStatus::PartiallySucceeded,
            (true, true) => ResultStatus::Succeeded,
            (true, false) => ResultStatus::Failed,
        }
    }

    pub fn from_parts(
        payloads: BTreeMap<String, Value>,
        mut failures: Vec<SourceFailure>,
    ) -> Self {
        failures.retain(|failure| !payloads.contains_key(&failure.source_key));
        failures.sort_by(|left, right| left.source_key.cmp(&right.source_key));
        failures.dedup_by(|left, right| left.source_key == right.source_key);
        Self { payloads, failures }
    }
}

#[derive(Clone)]
/// Issues one request per source and settles all of them, keeping only the
/// successes. A failing source never affects the others.
pub struct SummaryFetcher {
    client: Arc<dyn SummaryClient>,
}

impl SummaryFetcher {
    pub fn new(client: Arc<dyn SummaryClient>) -> Self {
        Self { client }
    }

    pub async fn fetch_all(&self, sources: Vec<SummarySource>) -> SummaryResult {
        let mut requested = BTreeSet::new();
        let mut tasks = JoinSet::new();
        for source in sources {
            let source_key = source.source_key();
            if !requested.insert(source_key) {
                tracing::warn!(
                    source = source_key,
                    "skipping duplicate summary source in one cycle"
                );
                continue;
            }
            let client = Arc::clone(&self.client);
            tasks.spawn(async move {
                let outcome = client.fetch(&source).await;
                (source, outcome)
            });
        }

        let mut payloads = BTreeMap::new();
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((source, Ok(payload))) => {
                    payloads.insert(source.source_key().to_string(), payload);
                }
                Ok((source, Err(error))) => {
                    tracing::warn!(
                        source = source.source_key(),
                        error = %error,
                        "summary source failed"
                    );
                    failures.push(SourceFailure {
                        source_key: source.source_key().to_string(),
                        reason: error.to_string(),
                    });
                }
                Err(join_error) => {
                    tracing::warn!(error = %join_error, "summary source task did not complete");
                }
            }
        }

        // A task that panicked or was aborted reports nothing; account for it here.
        for source_key in requested {
            let settled = payloads.contains_key(source_key)
                || failures
                    .iter()
                    .any(|failure| failure.source_key == source_key);
            if !settled {
                failures.push(SourceFailure {
                    source_key: source_key.to_string(),
                    reason: "request task did not complete".to_string(),
                });
            }
        }

        SummaryResult::from_parts(payloads, failures)
    }
}
