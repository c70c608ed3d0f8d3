//! Aggregate view over every agent summary the orchestrator coordinates.

use chrono::{DateTime, Utc};
use fleetdash_client::SummarySource;
use fleetdash_core::AgentRegistry;
use serde::Serialize;

use crate::agent_views::{
    project_jira_detail, project_test_case_detail, project_test_data_detail,
    project_test_script_detail, project_token_metrics, JiraDetail, TestCaseDetail,
    TestDataDetail, TestScriptDetail, TokenMetricsView, TOKENS_SOURCE_KEY,
};
use crate::summary_fetcher::SummaryResult;

const CARD_SOURCES: [SummarySource; 4] = [
    SummarySource::TestCaseSummary,
    SummarySource::TestDataSummary,
    SummarySource::TestScriptSummary,
    SummarySource::JiraSummary,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestratorView {
    pub orchestrator: Option<TokenMetricsView>,
    pub active_summaries: usize,
    pub test_case: Option<TestCaseDetail>,
    pub test_data: Option<TestDataDetail>,
    pub test_script: Option<TestScriptDetail>,
    pub jira: Option<JiraDetail>,
}

/// Orchestrator tokens (when the registry names an orchestrator) plus every
/// card source.
pub fn orchestrator_sources(registry: &AgentRegistry) -> Vec<SummarySource> {
    let mut sources: Vec<SummarySource> = registry
        .orchestrator()
        .map(|entry| SummarySource::AgentTokens(entry.backend_key.clone()))
        .into_iter()
        .collect();
    sources.extend(CARD_SOURCES.iter().cloned());
    sources
}

pub fn project_orchestrator(result: &SummaryResult, now: DateTime<Utc>) -> OrchestratorView {
    let card = |source: &SummarySource| result.get(source.source_key());
    OrchestratorView {
        orchestrator: result
            .get(TOKENS_SOURCE_KEY)
            .map(|payload| project_token_metrics(payload, now)),
        active_summaries: CARD_SOURCES
            .iter()
            .filter(|source| result.contains(source.source_key()))
            .count(),
        test_case: card(&SummarySource::TestCaseSummary).map(project_test_case_detail),
        test_data: card(&SummarySource::TestDataSummary).map(project_test_data_detail),
        test_script: card(&SummarySource::TestScriptSummary).map(project_test_script_detail),
        jira: card(&SummarySource::JiraSummary).map(project_jira_detail),
    }
}
