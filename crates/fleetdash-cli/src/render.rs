//! Plain-text and JSON renderings of dashboard views for the terminal.

use anyhow::{Context, Result};
use fleetdash_core::AgentRegistry;
use fleetdash_dashboard::agent_views::{
    CountEntry, JiraDetail, StatusBadge, TestCaseDetail, TestDataDetail, TestFailureDetail,
    TestScriptDetail,
};
use fleetdash_dashboard::{
    AgentDetailView, AgentSummaryView, FetchState, OrchestratorView, TestCaseListing,
    TestDataListing, TokenMetricsView,
};
use serde::Serialize;

pub(crate) fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize view as JSON")
}

/// Renders a board state, delegating settled views to `render_view`.
pub(crate) fn render_state<T>(state: &FetchState<T>, render_view: impl Fn(&T) -> String) -> String {
    match state {
        FetchState::NotFetched => "Not fetched yet".to_string(),
        FetchState::Fetching { generation } => format!("Loading (cycle {generation})..."),
        FetchState::Succeeded { view, .. } => render_view(view),
        FetchState::PartiallySucceeded {
            view,
            missing_sources,
            ..
        } => format!(
            "{}\n\nUnavailable sources: {}",
            render_view(view),
            missing_sources.join(", ")
        ),
        FetchState::Failed { message, .. } => message.clone(),
    }
}

pub(crate) fn render_agents(registry: &AgentRegistry) -> String {
    let mut lines = vec![format!("{:<36} {:<36} {}", "AGENT", "BACKEND KEY", "KIND")];
    lines.extend(registry.entries().map(|entry| {
        format!(
            "{:<36} {:<36} {}",
            entry.display_name, entry.backend_key, entry.kind
        )
    }));
    lines.join("\n")
}

fn push_metrics(lines: &mut Vec<String>, metrics: &TokenMetricsView) {
    lines.push(format!("  Total tokens:      {}", metrics.total_tokens));
    lines.push(format!("  Execution time:    {}", metrics.execution_time));
    lines.push(format!("  Tokens per second: {}", metrics.tokens_per_second));
    lines.push(format!("  Last updated:      {}", metrics.last_updated));
    if let Some(timeline) = &metrics.timeline {
        lines.push(format!(
            "  Timeline:          {} -> {} ({})",
            timeline.start, timeline.end, timeline.duration
        ));
    }
}

fn push_counts(lines: &mut Vec<String>, heading: &str, counts: &[CountEntry]) {
    if counts.is_empty() {
        return;
    }
    lines.push(format!("  {heading}:"));
    lines.extend(
        counts
            .iter()
            .map(|entry| format!("    {:<24} {}", entry.label, entry.count)),
    );
}

fn push_test_case(lines: &mut Vec<String>, detail: &TestCaseDetail) {
    let badge = match detail.badge {
        StatusBadge::Success => "ok",
        StatusBadge::Failure => "!!",
    };
    lines.push(format!("  Status:     [{badge}] {}", detail.status));
    lines.push(format!("  File:       {}", detail.file_name));
    lines.push(format!("  Action:     {}", detail.action_performed));
    lines.push(format!("  Message:    {}", detail.message));
    lines.push(format!("  Generated:  {}", detail.generated_count));
    lines.push(format!("  Documents:  {}", detail.document_count));
    push_counts(lines, "By type", &detail.by_type);
    push_counts(lines, "By subtype", &detail.by_subtype);
}

fn push_test_data(lines: &mut Vec<String>, detail: &TestDataDetail) {
    lines.push(format!("  Execution:       {}", detail.execution_id));
    lines.push(format!("  Last updated:    {}", detail.last_updated));
    lines.push(format!(
        "  Identified:      {}",
        detail.total_identified_and_generated
    ));
    lines.push(format!(
        "  From database:   {} ({}%)",
        detail.from_database, detail.from_database_share
    ));
    lines.push(format!(
        "  Synthetic:       {} ({}%)",
        detail.synthetic, detail.synthetic_share
    ));
    lines.push(format!("  Tile total:      {}", detail.tile_total_generated));
}

fn push_test_script(lines: &mut Vec<String>, detail: &TestScriptDetail) {
    lines.push(format!("  Test cases:   {}", detail.total_test_cases));
    lines.push(format!("  Scripts:      {}", detail.scripts_total));
    lines.push(format!("  Web:          {} ({}%)", detail.web, detail.web_share));
    lines.push(format!(
        "  Mobile:       {} ({}%)",
        detail.mobile, detail.mobile_share
    ));
    lines.push(format!("  API:          {} ({}%)", detail.api, detail.api_share));
    lines.push(format!("  Automatable:  {}", detail.automatable_tests));
    lines.push(format!("  Coverage:     {}", detail.automation_coverage));
    lines.push(format!("  Feasibility:  {}", detail.automation_feasibility));
}

fn push_jira(lines: &mut Vec<String>, detail: &JiraDetail) {
    lines.push(format!("  Project:                 {}", detail.project_name));
    lines.push(format!(
        "  Extracted user stories:  {}",
        detail.extracted_user_stories
    ));
    lines.push(format!("  Defects:                 {}", detail.defects_in_project));
    lines.push(format!(
        "  Retest (lead/engineer):  {} / {}",
        detail.defects_for_retest_by_lead, detail.defects_for_retest_by_engineer
    ));
    lines.push(format!(
        "  Tests uploaded:          {} of {} ({}%)",
        detail.tests_uploaded, detail.tests_in_project, detail.tests_uploaded_share
    ));
    lines.push(format!(
        "  Stories (lead/extracted/assigned): {} / {} / {}",
        detail.stories_assigned_by_lead,
        detail.stories_extracted_by_engineer,
        detail.stories_assigned_to_engineer
    ));
}

fn push_test_failure(lines: &mut Vec<String>, detail: &TestFailureDetail) {
    lines.push(format!("  Analysis:            {}", detail.analysis_status));
    lines.push(format!(
        "  Scripts analyzed:    {} of {}",
        detail.scripts_analyzed, detail.total_scripts
    ));
    lines.push(format!(
        "  Application issues:  {} ({}%)",
        detail.application_issues, detail.application_share
    ));
    lines.push(format!(
        "  Automation issues:   {} ({}%)",
        detail.automation_issues, detail.automation_share
    ));
    lines.push(format!("  Recommendations:     {}", detail.recommendations));
    lines.push(format!(
        "  Health:              {} ({} with issues, {} healthy)",
        detail.health_score, detail.scripts_with_issues, detail.scripts_healthy
    ));
    if let Some(summary) = &detail.summary {
        lines.push(format!("  Summary: {summary}"));
    }
}

pub(crate) fn render_agent_summary(view: &AgentSummaryView) -> String {
    let mut lines = vec![view.agent.display_name.clone(), view.subtitle.clone(), String::new()];
    push_metrics(&mut lines, &view.metrics);

    if let Some(detail) = &view.detail {
        lines.push(String::new());
        if let Some(heading) = &view.detail_heading {
            lines.push(heading.clone());
        }
        match detail {
            AgentDetailView::TestCase(detail) => push_test_case(&mut lines, detail),
            AgentDetailView::TestData(detail) => push_test_data(&mut lines, detail),
            AgentDetailView::TestScript(detail) => push_test_script(&mut lines, detail),
            AgentDetailView::Jira(detail) => push_jira(&mut lines, detail),
            AgentDetailView::TestFailure(detail) => push_test_failure(&mut lines, detail),
            AgentDetailView::Unavailable { message } => lines.push(format!("  {message}")),
        }
    }
    lines.join("\n")
}

pub(crate) fn render_orchestrator(view: &OrchestratorView) -> String {
    let mut lines = vec![
        "Orchestration Agent".to_string(),
        format!("Active agent summaries: {}", view.active_summaries),
    ];
    if let Some(metrics) = &view.orchestrator {
        lines.push(String::new());
        push_metrics(&mut lines, metrics);
    }
    if let Some(detail) = &view.test_case {
        lines.extend([String::new(), "Test Case Generator".to_string()]);
        push_test_case(&mut lines, detail);
    }
    if let Some(detail) = &view.test_data {
        lines.extend([String::new(), "Test Data".to_string()]);
        push_test_data(&mut lines, detail);
    }
    if let Some(detail) = &view.test_script {
        lines.extend([String::new(), "Test Script Generator".to_string()]);
        push_test_script(&mut lines, detail);
    }
    if let Some(detail) = &view.jira {
        lines.extend([String::new(), "Jira Management".to_string()]);
        push_jira(&mut lines, detail);
    }
    lines.join("\n")
}

pub(crate) fn render_test_cases(listing: &TestCaseListing) -> String {
    let statistics = &listing.statistics;
    let mut lines = vec![format!(
        "Total: {}  Functional: {}  Non-functional: {}",
        statistics.total, statistics.functional, statistics.non_functional
    )];
    if listing.cases.is_empty() {
        lines.push("No test cases available".to_string());
    }
    for case in &listing.cases {
        lines.push(String::new());
        lines.push(format!("{}  {}", case.id, case.title));
        lines.push(format!(
            "  {} | {} | {}",
            case.complexity, case.estimated_duration, case.status_color
        ));
        if !case.tags.is_empty() {
            lines.push(format!("  Tags: {}", case.tags.join(", ")));
        }
        lines.push(format!("  Preconditions: {}", case.preconditions));
        lines.extend(
            case.steps
                .iter()
                .enumerate()
                .map(|(index, step)| format!("  {}. {step}", index + 1)),
        );
        lines.push(format!("  Expected: {}", case.expected_result));
    }
    lines.join("\n")
}

pub(crate) fn render_test_data(listing: &TestDataListing) -> String {
    let statistics = &listing.statistics;
    let mut lines = vec![format!(
        "Records: {}  Synthetic: {}  Database: {}  Coverage: {}%",
        statistics.total, statistics.synthetic, statistics.database, statistics.coverage
    )];
    if listing.records.is_empty() {
        lines.push("No test data available".to_string());
    }
    lines.extend(listing.records.iter().map(|record| {
        format!(
            "{:<12} {:<16} {:<20} {:<13} {:<12} {}",
            record.test_case_id,
            record.entity,
            record.field,
            record.data_type.label(),
            record.source.label(),
            record.sample_value
        )
    }));
    lines.join("\n")
}
