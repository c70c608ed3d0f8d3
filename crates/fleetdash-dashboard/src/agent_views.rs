//! Projection of aggregated summaries into display-ready agent views.
//!
//! All projections are pure functions of a [`SummaryResult`] (plus the
//! current time for relative timestamps). Missing payloads or fields degrade
//! to placeholders.

use chrono::{DateTime, Utc};
use fleetdash_client::SummarySource;
use fleetdash_core::{format_timestamp, AgentIdentity, AgentKind};
use serde::Serialize;
use serde_json::Value;

use crate::format::{format_execution_time, format_share, format_time_ago, format_tokens};
use crate::payload::{counts_at, display_at, number_at, text_at, value_at};
use crate::summary_fetcher::SummaryResult;

pub const TOKENS_SOURCE_KEY: &str = "tokens";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionTimelineView {
    pub start: String,
    pub end: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Headline metrics shown for every agent.
pub struct TokenMetricsView {
    pub total_tokens: String,
    pub execution_time: String,
    pub tokens_per_second: String,
    pub last_updated: String,
    pub timeline: Option<ExecutionTimelineView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBadge {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseDetail {
    pub status: String,
    pub badge: StatusBadge,
    pub file_name: String,
    pub message: String,
    pub action_performed: String,
    pub generated_count: String,
    pub document_count: String,
    pub by_type: Vec<CountEntry>,
    pub by_subtype: Vec<CountEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestDataDetail {
    pub execution_id: String,
    pub last_updated: String,
    pub total_identified_and_generated: String,
    pub from_database: String,
    pub from_database_share: String,
    pub synthetic: String,
    pub synthetic_share: String,
    pub tile_total_generated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestScriptDetail {
    pub total_test_cases: String,
    pub scripts_total: String,
    pub web: String,
    pub web_share: String,
    pub mobile: String,
    pub mobile_share: String,
    pub api: String,
    pub api_share: String,
    pub automatable_tests: String,
    pub automation_coverage: String,
    pub automation_feasibility: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraDetail {
    pub project_name: String,
    pub extracted_user_stories: String,
    pub defects_in_project: String,
    pub defects_for_retest_by_lead: String,
    pub defects_for_retest_by_engineer: String,
    pub tests_in_project: String,
    pub tests_uploaded: String,
    pub tests_uploaded_share: String,
    pub stories_assigned_by_lead: String,
    pub stories_extracted_by_engineer: String,
    pub stories_assigned_to_engineer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestFailureDetail {
    pub analysis_status: String,
    pub total_scripts: String,
    pub application_issues: String,
    pub application_share: String,
    pub automation_issues: String,
    pub automation_share: String,
    pub recommendations: String,
    pub scripts_analyzed: String,
    pub health_score: String,
    pub scripts_with_issues: String,
    pub scripts_healthy: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentDetailView {
    TestCase(TestCaseDetail),
    TestData(TestDataDetail),
    TestScript(TestScriptDetail),
    Jira(JiraDetail),
    TestFailure(TestFailureDetail),
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummaryView {
    pub agent: AgentIdentity,
    pub subtitle: String,
    pub detail_heading: Option<String>,
    pub metrics: TokenMetricsView,
    pub detail: Option<AgentDetailView>,
}

/// Detail endpoint for agent kinds that have one.
pub fn detail_source(kind: AgentKind) -> Option<SummarySource> {
    match kind {
        AgentKind::TestCaseGenerator => Some(SummarySource::TestCaseSummary),
        AgentKind::TestData => Some(SummarySource::TestDataSummary),
        AgentKind::TestScriptGenerator => Some(SummarySource::TestScriptSummary),
        AgentKind::JiraManagement => Some(SummarySource::JiraSummary),
        AgentKind::TestFailureAnalysis => Some(SummarySource::TestFailureSummary),
        _ => None,
    }
}

/// Sources fetched for one agent's summary view.
pub fn agent_summary_sources(identity: &AgentIdentity) -> Vec<SummarySource> {
    let mut sources = vec![SummarySource::AgentTokens(identity.backend_key.clone())];
    sources.extend(detail_source(identity.kind));
    sources
}

pub fn agent_subtitle(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::TestCaseGenerator => "Performance Overview & Test Case Generation Summary",
        AgentKind::TestData => "Performance Overview & Test Data Generation Summary",
        AgentKind::TestScriptGenerator => "Performance Overview & Test Script Generation Summary",
        AgentKind::JiraManagement => "Performance Overview & Jira Management Summary",
        AgentKind::TestFailureAnalysis => "Performance Overview & Test Failure Analysis Summary",
        _ => "Performance Overview & Execution Summary",
    }
}

pub fn detail_heading(kind: AgentKind) -> Option<&'static str> {
    match kind {
        AgentKind::TestCaseGenerator => Some("Test Case Generation Details"),
        AgentKind::TestData => Some("Test Data Generation Details"),
        AgentKind::TestScriptGenerator => Some("Test Script Generation Details"),
        AgentKind::JiraManagement => Some("Jira Management Details"),
        AgentKind::TestFailureAnalysis => Some("Test Failure Analysis Details"),
        _ => None,
    }
}

fn unavailable_message(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::TestCaseGenerator => "No test case execution data available",
        AgentKind::TestData => "No test data summary available",
        AgentKind::TestScriptGenerator => "No test script summary available",
        AgentKind::JiraManagement => "No Jira metrics available",
        AgentKind::TestFailureAnalysis => "No test failure analysis data available",
        _ => "No detail data available",
    }
}

pub fn project_token_metrics(payload: &Value, now: DateTime<Utc>) -> TokenMetricsView {
    let execution_time = format_execution_time(number_at(payload, &["executionTime"]).unwrap_or(0.0));
    let last_updated = text_at(payload, &["lastUpdated"]).or_else(|| text_at(payload, &["lastEndTime"]));
    let timeline = match (
        text_at(payload, &["lastStartTime"]),
        text_at(payload, &["lastEndTime"]),
    ) {
        (Some(start), Some(end)) => Some(ExecutionTimelineView {
            start: format_timestamp(Some(start)),
            end: format_timestamp(Some(end)),
            duration: execution_time.clone(),
        }),
        _ => None,
    };

    TokenMetricsView {
        total_tokens: format_tokens(number_at(payload, &["tokensConsumed"]).unwrap_or(0.0)),
        execution_time,
        tokens_per_second: display_at(payload, &["tokensPerSecond"], "0"),
        last_updated: format_time_ago(last_updated, now),
        timeline,
    }
}

fn count_entries(payload: &Value, path: &[&str]) -> Vec<CountEntry> {
    counts_at(payload, path)
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect()
}

pub fn project_test_case_detail(payload: &Value) -> TestCaseDetail {
    let raw_status = text_at(payload, &["status"]);
    TestCaseDetail {
        status: raw_status
            .map(str::to_uppercase)
            .unwrap_or_else(|| "N/A".to_string()),
        badge: if raw_status == Some("success") {
            StatusBadge::Success
        } else {
            StatusBadge::Failure
        },
        file_name: text_at(payload, &["file_path"])
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .unwrap_or("N/A")
            .to_string(),
        message: display_at(payload, &["message"], "-"),
        action_performed: display_at(payload, &["action_performed"], "-"),
        generated_count: display_at(payload, &["count"], "0"),
        document_count: display_at(payload, &["statistics", "total_documents"], "0"),
        by_type: count_entries(payload, &["statistics", "by_type"]),
        by_subtype: count_entries(payload, &["statistics", "by_subtype"]),
    }
}

pub fn project_test_data_detail(payload: &Value) -> TestDataDetail {
    let summary = value_at(payload, &["agent_summary"]).unwrap_or(&Value::Null);
    let total_field = "total_test_data_identified_and_generated";
    let database_field = "test_data_identified_from_database";
    let synthetic_field = "synthetic_test_data_generated";
    let total = number_at(summary, &[total_field]).unwrap_or(0.0);
    let share = |field: &str| format_share(number_at(summary, &[field]).unwrap_or(0.0), total);
    TestDataDetail {
        execution_id: display_at(payload, &["execution_id"], "N/A"),
        last_updated: format_timestamp(text_at(payload, &["timestamp"])),
        total_identified_and_generated: display_at(summary, &[total_field], "0"),
        from_database: display_at(summary, &[database_field], "0"),
        from_database_share: share(database_field),
        synthetic: display_at(summary, &[synthetic_field], "0"),
        synthetic_share: share(synthetic_field),
        tile_total_generated: display_at(
            payload,
            &["agentic_tile", "total_test_data_generated"],
            "0",
        ),
    }
}

pub fn project_test_script_detail(payload: &Value) -> TestScriptDetail {
    let metrics = value_at(payload, &["test_metrics"]).unwrap_or(&Value::Null);
    let scripts = value_at(metrics, &["scripts_generated"]).unwrap_or(&Value::Null);
    let total = number_at(scripts, &["total"]).unwrap_or(0.0);
    let share = |field: &str| format_share(number_at(scripts, &[field]).unwrap_or(0.0), total);
    TestScriptDetail {
        total_test_cases: display_at(metrics, &["total_test_cases"], "0"),
        scripts_total: display_at(scripts, &["total"], "0"),
        web: display_at(scripts, &["web"], "0"),
        web_share: share("web"),
        mobile: display_at(scripts, &["mobile"], "0"),
        mobile_share: share("mobile"),
        api: display_at(scripts, &["api"], "0"),
        api_share: share("api"),
        automatable_tests: format!("{}%", display_at(metrics, &["automatable_tests"], "0")),
        automation_coverage: format!("{}%", display_at(metrics, &["automation_coverage"], "0")),
        automation_feasibility: format!(
            "{}%",
            display_at(metrics, &["automation_feasibility"], "0")
        ),
    }
}

pub fn project_jira_detail(payload: &Value) -> JiraDetail {
    let summary = value_at(payload, &["agentic_summary"]).unwrap_or(&Value::Null);
    let title = value_at(payload, &["agentic_title_details"]).unwrap_or(&Value::Null);
    let stories = value_at(summary, &["total_user_stories"]).unwrap_or(&Value::Null);
    let defects = value_at(summary, &["total_defects"]).unwrap_or(&Value::Null);
    let tests = value_at(summary, &["total_tests"]).unwrap_or(&Value::Null);
    JiraDetail {
        project_name: display_at(title, &["project_name"], "N/A"),
        extracted_user_stories: display_at(title, &["extracted_user_stories"], "0"),
        defects_in_project: display_at(defects, &["total_defects_in_project"], "0"),
        defects_for_retest_by_lead: display_at(
            defects,
            &["total_defects_assigned_for_retest_by_engineers_lead"],
            "0",
        ),
        defects_for_retest_by_engineer: display_at(
            defects,
            &["total_defects_assigned_for_retesting_engineer"],
            "0",
        ),
        tests_in_project: display_at(tests, &["total_tests_in_project"], "0"),
        tests_uploaded: display_at(tests, &["tests_uploaded_to_jira"], "0"),
        tests_uploaded_share: format_share(
            number_at(tests, &["tests_uploaded_to_jira"]).unwrap_or(0.0),
            number_at(tests, &["total_tests_in_project"]).unwrap_or(0.0),
        ),
        stories_assigned_by_lead: display_at(
            stories,
            &["test_lead_total_assigned_user_stories_by_all_users"],
            "0",
        ),
        stories_extracted_by_engineer: display_at(
            stories,
            &["test_engineer_total_extracted_user_stories"],
            "0",
        ),
        stories_assigned_to_engineer: display_at(
            stories,
            &["test_engineer_total_assigned_user_stories"],
            "0",
        ),
    }
}

pub fn project_test_failure_detail(payload: &Value) -> TestFailureDetail {
    let data = value_at(payload, &["data"]).unwrap_or(&Value::Null);
    let metrics = value_at(data, &["metrics"]).unwrap_or(&Value::Null);
    let analysis = value_at(data, &["analysisDetails"]).unwrap_or(&Value::Null);
    let health = value_at(metrics, &["overallHealth"]).unwrap_or(&Value::Null);
    let total_scripts = display_at(data, &["totalScripts"], "0");
    TestFailureDetail {
        analysis_status: display_at(analysis, &["status"], "COMPLETED"),
        application_issues: display_at(data, &["applicationIssues"], "0"),
        application_share: display_at(
            metrics,
            &["issueDistribution", "application", "percentage"],
            "0",
        ),
        automation_issues: display_at(data, &["automationIssues"], "0"),
        automation_share: display_at(
            metrics,
            &["issueDistribution", "automation", "percentage"],
            "0",
        ),
        recommendations: display_at(data, &["totalRecommendations"], "0"),
        scripts_analyzed: display_at(analysis, &["scriptsAnalyzed"], &total_scripts),
        health_score: display_at(health, &["healthScore"], "0"),
        scripts_with_issues: display_at(health, &["scriptsWithIssues"], "0"),
        scripts_healthy: display_at(health, &["scriptsHealthy"], "0"),
        summary: text_at(data, &["summary"]).map(str::to_string),
        total_scripts,
    }
}

pub fn project_agent_detail(kind: AgentKind, result: &SummaryResult) -> Option<AgentDetailView> {
    let source = detail_source(kind)?;
    let Some(payload) = result.get(source.source_key()) else {
        return Some(AgentDetailView::Unavailable {
            message: unavailable_message(kind).to_string(),
        });
    };
    let detail = match kind {
        AgentKind::TestCaseGenerator => AgentDetailView::TestCase(project_test_case_detail(payload)),
        AgentKind::TestData => AgentDetailView::TestData(project_test_data_detail(payload)),
        AgentKind::TestScriptGenerator => {
            AgentDetailView::TestScript(project_test_script_detail(payload))
        }
        AgentKind::JiraManagement => AgentDetailView::Jira(project_jira_detail(payload)),
        AgentKind::TestFailureAnalysis => {
            AgentDetailView::TestFailure(project_test_failure_detail(payload))
        }
        _ => return None,
    };
    Some(detail)
}

/// Agent summary view, or `None` when the headline token source is missing.
pub fn project_agent_summary(
    identity: &AgentIdentity,
    result: &SummaryResult,
    now: DateTime<Utc>,
) -> Option<AgentSummaryView> {
    let tokens = result.get(TOKENS_SOURCE_KEY)?;
    Some(AgentSummaryView {
        agent: identity.clone(),
        subtitle: agent_subtitle(identity.kind).to_string(),
        detail_heading: detail_heading(identity.kind).map(str::to_string),
        metrics: project_token_metrics(tokens, now),
        detail: project_agent_detail(identity.kind, result),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use fleetdash_client::SummarySource;
    use fleetdash_core::{AgentKind, AgentRegistry};
    use serde_json::{json, Value};

    use super::{
        agent_summary_sources, project_agent_summary, project_jira_detail,
        project_test_case_detail, project_test_data_detail, project_test_failure_detail,
        project_test_script_detail, project_token_metrics, AgentDetailView, StatusBadge,
    };
    use crate::summary_fetcher::{SourceFailure, SummaryResult};

    fn result_with(entries: &[(&str, Value)]) -> SummaryResult {
        let payloads = entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect::<BTreeMap<_, _>>();
        SummaryResult::from_parts(payloads, Vec::new())
    }

    #[test]
    fn agent_sources_follow_the_agent_kind() {
        let registry = AgentRegistry::builtin();
        assert_eq!(
            agent_summary_sources(&registry.resolve("Jira Management Agent")),
            vec![
                SummarySource::AgentTokens("jira_mcp_agent".to_string()),
                SummarySource::JiraSummary
            ]
        );
        assert_eq!(
            agent_summary_sources(&registry.resolve("Self Healing Agent")),
            vec![SummarySource::AgentTokens("self_healing_root_agent".to_string())]
        );
    }

    #[test]
    fn jira_summary_renders_tokens_duration_and_defects() {
        let identity = AgentRegistry::builtin().resolve("Jira Management Agent");
        let result = result_with(&[
            ("tokens", json!({"tokensConsumed": 1_500_000, "executionTime": 185})),
            (
                "jira",
                json!({"agentic_summary": {"total_defects": {"total_defects_in_project": 3}}}),
            ),
        ]);

        let view = project_agent_summary(&identity, &result, Utc::now()).expect("summary view");

        assert_eq!(view.metrics.total_tokens, "1.5M");
        assert_eq!(view.metrics.execution_time, "3m 5s");
        assert_eq!(view.metrics.tokens_per_second, "0");
        assert_eq!(view.metrics.last_updated, "Unknown");
        assert_eq!(view.subtitle, "Performance Overview & Jira Management Summary");
        match view.detail {
            Some(AgentDetailView::Jira(detail)) => {
                assert_eq!(detail.defects_in_project, "3");
                assert_eq!(detail.project_name, "N/A");
                assert_eq!(detail.tests_uploaded_share, "0.0");
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn missing_detail_source_degrades_to_unavailable() {
        let identity = AgentRegistry::builtin().resolve("Test Data Agent");
        let payloads = [("tokens".to_string(), json!({}))].into_iter().collect();
        let result = SummaryResult::from_parts(
            payloads,
            vec![SourceFailure {
                source_key: "testData".to_string(),
                reason: "timeout".to_string(),
            }],
        );

        let view = project_agent_summary(&identity, &result, Utc::now()).expect("summary view");
        assert_eq!(view.metrics.total_tokens, "0");
        assert_eq!(view.metrics.execution_time, "0 min");
        assert_eq!(
            view.detail,
            Some(AgentDetailView::Unavailable {
                message: "No test data summary available".to_string()
            })
        );
    }

    #[test]
    fn missing_token_source_yields_no_view() {
        let identity = AgentRegistry::builtin().resolve("Jira Management Agent");
        let result = result_with(&[("jira", json!({}))]);
        assert!(project_agent_summary(&identity, &result, Utc::now()).is_none());
    }

    #[test]
    fn agents_without_detail_endpoint_have_no_detail() {
        let identity = AgentRegistry::builtin().resolve("Some New Agent");
        assert_eq!(identity.kind, AgentKind::Other);
        let result = result_with(&[("tokens", json!({"tokensConsumed": 900}))]);
        let view = project_agent_summary(&identity, &result, Utc::now()).expect("summary view");
        assert_eq!(view.metrics.total_tokens, "900");
        assert_eq!(view.detail_heading, None);
        assert_eq!(view.detail, None);
    }

    #[test]
    fn token_metrics_build_timeline_only_with_both_ends() {
        let now = Utc.with_ymd_and_hms(2024, 8, 21, 18, 0, 0).unwrap();
        let metrics = project_token_metrics(
            &json!({
                "tokensConsumed": 2_300_000,
                "executionTime": 95,
                "tokensPerSecond": 412.5,
                "lastStartTime": "2024-08-21T14:28:25Z",
                "lastEndTime": "2024-08-21T14:30:00Z"
            }),
            now,
        );
        assert_eq!(metrics.total_tokens, "2.3M");
        assert_eq!(metrics.tokens_per_second, "412.5");
        assert_eq!(metrics.last_updated, "4 hours ago");
        let timeline = metrics.timeline.expect("timeline");
        assert_eq!(timeline.start, "2024-08-21 14:28:25 UTC");
        assert_eq!(timeline.end, "2024-08-21 14:30:00 UTC");
        assert_eq!(timeline.duration, "1m 35s");

        let without_start = project_token_metrics(
            &json!({"lastUpdated": "2024-08-21T17:45:00Z", "lastEndTime": "2024-08-19T00:00:00Z"}),
            now,
        );
        assert!(without_start.timeline.is_none());
        assert_eq!(without_start.last_updated, "Less than an hour ago");
    }

    #[test]
    fn test_case_detail_reads_status_file_and_distribution() {
        let detail = project_test_case_detail(&json!({
            "status": "success",
            "file_path": "/data/output/invoice_cases.xlsx",
            "message": "Generated 12 cases",
            "count": 12,
            "statistics": {
                "total_documents": 2,
                "by_type": {"Functional": 9, "Non-Functional": 3},
                "by_subtype": {"happy": 5}
            }
        }));
        assert_eq!(detail.status, "SUCCESS");
        assert_eq!(detail.badge, StatusBadge::Success);
        assert_eq!(detail.file_name, "invoice_cases.xlsx");
        assert_eq!(detail.generated_count, "12");
        assert_eq!(detail.document_count, "2");
        assert_eq!(detail.by_type.len(), 2);
        assert_eq!(detail.by_subtype[0].label, "happy");

        let empty = project_test_case_detail(&json!({}));
        assert_eq!(empty.status, "N/A");
        assert_eq!(empty.badge, StatusBadge::Failure);
        assert_eq!(empty.file_name, "N/A");
        assert!(empty.by_type.is_empty());
    }

    #[test]
    fn test_data_shares_use_total_as_denominator() {
        let detail = project_test_data_detail(&json!({
            "execution_id": "exec-42",
            "timestamp": "2024-08-21T10:00:00Z",
            "agent_summary": {
                "total_test_data_identified_and_generated": 8,
                "test_data_identified_from_database": 2,
                "synthetic_test_data_generated": 6
            },
            "agentic_tile": {"total_test_data_generated": 8}
        }));
        assert_eq!(detail.execution_id, "exec-42");
        assert_eq!(detail.last_updated, "2024-08-21 10:00:00 UTC");
        assert_eq!(detail.from_database_share, "25.0");
        assert_eq!(detail.synthetic_share, "75.0");
        assert_eq!(detail.tile_total_generated, "8");

        let empty = project_test_data_detail(&json!({"agent_summary": {"synthetic_test_data_generated": 3}}));
        assert_eq!(empty.execution_id, "N/A");
        assert_eq!(empty.last_updated, "N/A");
        assert_eq!(empty.synthetic_share, "0.0");
    }

    #[test]
    fn test_script_shares_guard_zero_totals() {
        let detail = project_test_script_detail(&json!({
            "test_metrics": {
                "total_test_cases": 40,
                "automatable_tests": 70,
                "automation_feasibility": 85,
                "scripts_generated": {"total": 20, "web": 10, "mobile": 5, "api": 5}
            }
        }));
        assert_eq!(detail.web_share, "50.0");
        assert_eq!(detail.mobile_share, "25.0");
        assert_eq!(detail.automatable_tests, "70%");
        assert_eq!(detail.automation_coverage, "0%");
        assert_eq!(detail.automation_feasibility, "85%");

        let empty = project_test_script_detail(&json!({"test_metrics": {"scripts_generated": {"web": 3}}}));
        assert_eq!(empty.web, "3");
        assert_eq!(empty.web_share, "0.0");
        assert_eq!(empty.scripts_total, "0");
        assert_eq!(empty.automation_feasibility, "0%");
    }

    #[test]
    fn jira_detail_reads_every_section() {
        let detail = project_jira_detail(&json!({
            "agentic_title_details": {"project_name": "XBAN", "extracted_user_stories": 14},
            "agentic_summary": {
                "total_user_stories": {
                    "test_lead_total_assigned_user_stories_by_all_users": 9,
                    "test_engineer_total_extracted_user_stories": 7,
                    "test_engineer_total_assigned_user_stories": 5
                },
                "total_defects": {
                    "total_defects_in_project": 4,
                    "total_defects_assigned_for_retest_by_engineers_lead": 2,
                    "total_defects_assigned_for_retesting_engineer": 1
                },
                "total_tests": {"total_tests_in_project": 40, "tests_uploaded_to_jira": 26}
            }
        }));
        assert_eq!(detail.project_name, "XBAN");
        assert_eq!(detail.extracted_user_stories, "14");
        assert_eq!(detail.defects_for_retest_by_lead, "2");
        assert_eq!(detail.tests_uploaded_share, "65.0");
        assert_eq!(detail.stories_assigned_to_engineer, "5");
    }

    #[test]
    fn test_failure_detail_falls_back_to_totals_and_defaults() {
        let detail = project_test_failure_detail(&json!({
            "data": {
                "totalScripts": 12,
                "applicationIssues": 3,
                "automationIssues": 2,
                "metrics": {
                    "issueDistribution": {"application": {"percentage": 25}},
                    "overallHealth": {"healthScore": 58.3, "scriptsHealthy": 7}
                },
                "summary": "Most failures stem from locator drift."
            }
        }));
        assert_eq!(detail.analysis_status, "COMPLETED");
        assert_eq!(detail.scripts_analyzed, "12");
        assert_eq!(detail.application_share, "25");
        assert_eq!(detail.automation_share, "0");
        assert_eq!(detail.health_score, "58.3");
        assert_eq!(detail.scripts_with_issues, "0");
        assert_eq!(
            detail.summary.as_deref(),
            Some("Most failures stem from locator drift.")
        );

        let empty = project_test_failure_detail(&json!({}));
        assert_eq!(empty.total_scripts, "0");
        assert_eq!(empty.scripts_analyzed, "0");
        assert_eq!(empty.summary, None);
    }
}
