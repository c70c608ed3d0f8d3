use std::sync::Arc;

use chrono::Utc;
use fleetdash_client::{SummaryClient, SummarySource};
use fleetdash_core::AgentRegistry;

use crate::agent_views::{
    agent_summary_sources, project_agent_summary, AgentSummaryView, TOKENS_SOURCE_KEY,
};
use crate::listings::{
    project_test_case_listing, project_test_data_listing, TestCaseListing, TestDataListing,
};
use crate::orchestrator_view::{orchestrator_sources, project_orchestrator, OrchestratorView};
use crate::summary_board::{CycleOutcome, Settled, SummaryBoard};
use crate::summary_fetcher::{ResultStatus, SummaryFetcher, SummaryResult};

/// Drives refresh cycles: fetch every source for a view, project the settled
/// result, and publish it to the view's board.
#[derive(Clone)]
pub struct DashboardRuntime {
    registry: Arc<AgentRegistry>,
    fetcher: SummaryFetcher,
}

fn settle<T>(result: &SummaryResult, view: T) -> Settled<T> {
    if result.failures().is_empty() {
        return Settled::Complete(view);
    }
    Settled::Partial {
        view,
        missing_sources: result
            .failures()
            .iter()
            .map(|failure| failure.source_key.clone())
            .collect(),
    }
}

fn failure_message(prefix: &str, result: &SummaryResult, source_key: &str) -> String {
    match result.failure_reason(source_key) {
        Some(reason) => format!("{prefix}: {reason}"),
        None => prefix.to_string(),
    }
}

impl DashboardRuntime {
    pub fn new(registry: Arc<AgentRegistry>, client: Arc<dyn SummaryClient>) -> Self {
        Self {
            registry,
            fetcher: SummaryFetcher::new(client),
        }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    async fn run_cycle<T, F>(
        &self,
        board: &SummaryBoard<T>,
        sources: Vec<SummarySource>,
        project: F,
    ) -> CycleOutcome
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(&SummaryResult) -> Settled<T>,
    {
        let ticket = board.begin_cycle();
        let result = self.fetcher.fetch_all(sources).await;
        if !board.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "skipping projection for superseded cycle"
            );
            return CycleOutcome::Superseded;
        }
        board.commit(ticket, project(&result))
    }

    pub async fn refresh_agent_summary(
        &self,
        board: &SummaryBoard<AgentSummaryView>,
        display_name: &str,
    ) -> CycleOutcome {
        let identity = self.registry.resolve(display_name);
        tracing::debug!(
            agent = %identity.display_name,
            backend_key = %identity.backend_key,
            kind = %identity.kind,
            "refreshing agent summary"
        );
        let sources = agent_summary_sources(&identity);
        self.run_cycle(board, sources, |result| {
            match project_agent_summary(&identity, result, Utc::now()) {
                Some(view) => settle(result, view),
                None => Settled::Failed(failure_message(
                    "Error loading summary",
                    result,
                    TOKENS_SOURCE_KEY,
                )),
            }
        })
        .await
    }

    pub async fn refresh_orchestrator(&self, board: &SummaryBoard<OrchestratorView>) -> CycleOutcome {
        let sources = orchestrator_sources(&self.registry);
        self.run_cycle(board, sources, |result| {
            if result.status() == ResultStatus::Failed {
                return Settled::Failed("Error loading summary".to_string());
            }
            settle(result, project_orchestrator(result, Utc::now()))
        })
        .await
    }

    pub async fn refresh_test_cases(&self, board: &SummaryBoard<TestCaseListing>) -> CycleOutcome {
        let source = SummarySource::TestCaseListing;
        let source_key = source.source_key();
        self.run_cycle(board, vec![source], |result| match result.get(source_key) {
            Some(payload) => Settled::Complete(project_test_case_listing(payload)),
            None => Settled::Failed(failure_message("Error loading test cases", result, source_key)),
        })
        .await
    }

    pub async fn refresh_test_data(&self, board: &SummaryBoard<TestDataListing>) -> CycleOutcome {
        let source = SummarySource::TestDataListing;
        let source_key = source.source_key();
        self.run_cycle(board, vec![source], |result| match result.get(source_key) {
            Some(payload) => Settled::Complete(project_test_data_listing(payload)),
            None => Settled::Failed(failure_message("Error loading test data", result, source_key)),
        })
        .await
    }
}
