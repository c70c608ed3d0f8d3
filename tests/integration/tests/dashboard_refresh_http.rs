use std::sync::Arc;
use std::time::Duration;

use fleetdash_client::{HttpSummaryClient, HttpSummaryClientConfig, SourceTimeoutPolicy};
use fleetdash_core::AgentRegistry;
use fleetdash_dashboard::agent_views::AgentDetailView;
use fleetdash_dashboard::{CycleOutcome, DashboardRuntime, FetchState, SummaryBoard};
use httpmock::prelude::*;
use serde_json::json;

fn runtime_for(server: &MockServer, timeouts: SourceTimeoutPolicy) -> DashboardRuntime {
    let client = HttpSummaryClient::new(HttpSummaryClientConfig {
        api_base: server.base_url(),
        timeouts,
    })
    .expect("summary client should be created");
    DashboardRuntime::new(Arc::new(AgentRegistry::builtin()), Arc::new(client))
}

#[tokio::test]
async fn jira_agent_summary_round_trips_through_http() {
    let server = MockServer::start();
    let tokens = server.mock(|when, then| {
        when.method(GET).path("/api/tokens/agent/jira_mcp_agent");
        then.status(200).json_body(json!({
            "tokensConsumed": 1_500_000,
            "executionTime": 185,
            "tokensPerSecond": 8108.1,
            "lastStartTime": "2024-08-21T14:27:00Z",
            "lastEndTime": "2024-08-21T14:30:05Z"
        }));
    });
    let jira = server.mock(|when, then| {
        when.method(GET).path("/api/jira/summary");
        then.status(200).json_body(json!({
            "agentic_summary": {"total_defects": {"total_defects_in_project": 3}}
        }));
    });
    let runtime = runtime_for(&server, SourceTimeoutPolicy::default());
    let board = SummaryBoard::new();

    let outcome = runtime
        .refresh_agent_summary(&board, "Jira Management Agent")
        .await;

    tokens.assert();
    jira.assert();
    assert_eq!(outcome, CycleOutcome::Applied);
    let FetchState::Succeeded { view, .. } = board.current() else {
        panic!("expected success, got {:?}", board.current());
    };
    assert_eq!(view.metrics.total_tokens, "1.5M");
    assert_eq!(view.metrics.execution_time, "3m 5s");
    assert_eq!(view.metrics.tokens_per_second, "8108.1");
    let timeline = view.metrics.timeline.expect("timeline");
    assert_eq!(timeline.end, "2024-08-21 14:30:05 UTC");
    match view.detail {
        Some(AgentDetailView::Jira(detail)) => {
            assert_eq!(detail.defects_in_project, "3");
            assert_eq!(detail.project_name, "N/A");
        }
        other => panic!("unexpected detail: {other:?}"),
    }
}

#[tokio::test]
async fn unmapped_agent_names_use_the_fallback_backend_key() {
    let server = MockServer::start();
    let tokens = server.mock(|when, then| {
        when.method(GET).path("/api/tokens/agent/some_new_agent");
        then.status(200).json_body(json!({"tokensConsumed": 950}));
    });
    let runtime = runtime_for(&server, SourceTimeoutPolicy::default());
    let board = SummaryBoard::new();

    runtime.refresh_agent_summary(&board, "Some New Agent").await;

    tokens.assert();
    let current = board.current();
    let view = current.view().expect("view");
    assert_eq!(view.metrics.total_tokens, "950");
    assert!(view.detail.is_none());
}

#[tokio::test]
async fn orchestrator_keeps_successful_sources_when_others_fail() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/tokens/agent/orchestrator_agent");
        then.status(200).json_body(json!({"tokensConsumed": 2_300_000}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/testcases/summary");
        then.status(200)
            .json_body(json!({"status": "success", "count": 12}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/testdata/summary");
        then.status(500).body("database unavailable");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/testscripts/summary");
        then.status(200).body("{not json");
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/jira/summary");
        then.status(200).json_body(json!({"agentic_title_details": {"project_name": "XBAN"}}));
    });
    let runtime = runtime_for(&server, SourceTimeoutPolicy::default());
    let board = SummaryBoard::new();

    runtime.refresh_orchestrator(&board).await;

    match board.current() {
        FetchState::PartiallySucceeded {
            view,
            missing_sources,
            ..
        } => {
            assert_eq!(
                missing_sources,
                vec!["testData".to_string(), "testScript".to_string()]
            );
            assert_eq!(view.active_summaries, 2);
            assert_eq!(
                view.orchestrator.map(|metrics| metrics.total_tokens),
                Some("2.3M".to_string())
            );
            assert_eq!(view.test_case.map(|card| card.status), Some("SUCCESS".to_string()));
            assert!(view.test_data.is_none());
            assert!(view.test_script.is_none());
            assert_eq!(view.jira.map(|card| card.project_name), Some("XBAN".to_string()));
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn slow_test_data_listing_times_out_with_listing_budget() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/testdata/all");
        then.status(200)
            .delay(Duration::from_millis(800))
            .json_body(json!({"success": true, "data": {"test_cases_with_data": []}}));
    });
    let runtime = runtime_for(
        &server,
        SourceTimeoutPolicy {
            request_timeout_ms: 5_000,
            listing_timeout_ms: 100,
        },
    );
    let board = SummaryBoard::new();

    runtime.refresh_test_data(&board).await;

    match board.current() {
        FetchState::Failed { message, .. } => {
            assert_eq!(
                message,
                "Error loading test data: request timed out after 100ms"
            );
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn test_data_listing_projects_records_from_http() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/testdata/all");
        then.status(200).json_body(json!({
            "success": true,
            "data": {"test_cases_with_data": [
                {
                    "testCaseId": "TC-7",
                    "status": "Database",
                    "subType": "error",
                    "testdata": {"vendor.code": "VEN001", "vendor.created": "2024-08-21"}
                }
            ]}
        }));
    });
    let runtime = runtime_for(&server, SourceTimeoutPolicy::default());
    let board = SummaryBoard::new();

    runtime.refresh_test_data(&board).await;

    let current = board.current();
    let listing = current.view().expect("listing");
    assert_eq!(listing.statistics.total, 2);
    assert_eq!(listing.statistics.database, 2);
    assert_eq!(listing.statistics.coverage, 100);
    assert_eq!(listing.records[0].id, "TC-7_0_vendor.code");
    assert_eq!(listing.records[0].data_type.label(), "Reference ID");
    assert_eq!(listing.records[1].data_type.label(), "DateTime");
}

#[tokio::test]
async fn newer_cycle_wins_over_a_slower_earlier_cycle() {
    let slow_server = MockServer::start();
    slow_server.mock(|when, then| {
        when.method(GET).path("/api/tokens/agent/self_healing_root_agent");
        then.status(200)
            .delay(Duration::from_millis(400))
            .json_body(json!({"tokensConsumed": 1_000}));
    });
    let fast_server = MockServer::start();
    fast_server.mock(|when, then| {
        when.method(GET).path("/api/tokens/agent/self_healing_root_agent");
        then.status(200).json_body(json!({"tokensConsumed": 5_000_000}));
    });
    let slow = runtime_for(&slow_server, SourceTimeoutPolicy::default());
    let fast = runtime_for(&fast_server, SourceTimeoutPolicy::default());
    let board = SummaryBoard::new();
    let mut updates = board.subscribe();

    let (slow_outcome, fast_outcome) = tokio::join!(
        slow.refresh_agent_summary(&board, "Self Healing Agent"),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            fast.refresh_agent_summary(&board, "Self Healing Agent").await
        }
    );

    assert_eq!(slow_outcome, CycleOutcome::Superseded);
    assert_eq!(fast_outcome, CycleOutcome::Applied);
    assert!(updates.has_changed().expect("board alive"));
    let latest = updates.borrow_and_update().clone();
    assert_eq!(latest.generation(), Some(2));
    assert_eq!(
        latest.view().map(|view| view.metrics.total_tokens.as_str()),
        Some("5.0M")
    );
}
