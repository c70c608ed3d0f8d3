use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use fleetdash_client::{HttpSummaryClient, HttpSummaryClientConfig, SourceTimeoutPolicy};
use fleetdash_core::AgentRegistry;
use fleetdash_dashboard::{DashboardRuntime, FetchState, SummaryBoard};
use serde::Serialize;

use crate::cli_args::{Cli, CliCommand};
use crate::render::{
    render_agent_summary, render_agents, render_json, render_orchestrator, render_state,
    render_test_cases, render_test_data,
};

pub(crate) fn build_runtime(cli: &Cli) -> Result<DashboardRuntime> {
    let registry = match &cli.agent_registry {
        Some(path) => AgentRegistry::load_from(path)
            .with_context(|| format!("failed to load agent registry {}", path.display()))?,
        None => AgentRegistry::builtin(),
    };
    let client = HttpSummaryClient::new(HttpSummaryClientConfig {
        api_base: cli.api_base.clone(),
        timeouts: SourceTimeoutPolicy {
            request_timeout_ms: cli.request_timeout_ms,
            listing_timeout_ms: cli.listing_timeout_ms,
        },
    })
    .context("failed to build summary client")?;
    Ok(DashboardRuntime::new(Arc::new(registry), Arc::new(client)))
}

fn finish<T: Serialize>(
    state: FetchState<T>,
    json: bool,
    render_view: impl Fn(&T) -> String,
) -> Result<String> {
    if let FetchState::Failed { message, .. } = &state {
        bail!("{message}");
    }
    if json {
        return render_json(&state);
    }
    Ok(render_state(&state, render_view))
}

/// Runs one single-shot command and returns its rendered output.
pub(crate) async fn execute(
    runtime: &DashboardRuntime,
    command: &CliCommand,
    json: bool,
) -> Result<String> {
    match command {
        CliCommand::Agents => {
            if json {
                let entries: Vec<_> = runtime.registry().entries().collect();
                return render_json(&entries);
            }
            Ok(render_agents(runtime.registry()))
        }
        CliCommand::Summary { agent } => {
            let board = SummaryBoard::new();
            runtime.refresh_agent_summary(&board, agent).await;
            finish(board.current(), json, render_agent_summary)
        }
        CliCommand::Orchestrator => {
            let board = SummaryBoard::new();
            runtime.refresh_orchestrator(&board).await;
            finish(board.current(), json, render_orchestrator)
        }
        CliCommand::TestCases => {
            let board = SummaryBoard::new();
            runtime.refresh_test_cases(&board).await;
            finish(board.current(), json, render_test_cases)
        }
        CliCommand::TestData => {
            let board = SummaryBoard::new();
            runtime.refresh_test_data(&board).await;
            finish(board.current(), json, render_test_data)
        }
        CliCommand::Watch { .. } => bail!("watch is a streaming command"),
    }
}

pub(crate) async fn run_watch(
    runtime: &DashboardRuntime,
    interval_ms: u64,
    cycles: Option<u64>,
    json: bool,
) -> Result<()> {
    watch_orchestrator(runtime, interval_ms, cycles, json, tokio::signal::ctrl_c())
        .await
        .map(|_| ())
}

/// Refreshes the orchestrator view until `cycles` is reached or `shutdown`
/// resolves. Shutdown is honoured mid-refresh as well as between refreshes.
async fn watch_orchestrator<F: Future>(
    runtime: &DashboardRuntime,
    interval_ms: u64,
    cycles: Option<u64>,
    json: bool,
    shutdown: F,
) -> Result<u64> {
    tokio::pin!(shutdown);
    let board = SummaryBoard::new();
    let mut completed = 0_u64;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(cycles = completed, "watch shutdown requested");
                return Ok(completed);
            }
            _ = runtime.refresh_orchestrator(&board) => {}
        }
        let state = board.current();
        let rendered = if json {
            render_json(&state)?
        } else {
            render_state(&state, render_orchestrator)
        };
        println!("{rendered}");
        completed = completed.saturating_add(1);
        if cycles.is_some_and(|limit| completed >= limit) {
            return Ok(completed);
        }

        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(cycles = completed, "watch shutdown requested");
                return Ok(completed);
            }
            _ = tokio::time::sleep(Duration::from_millis(interval_ms)) => {}
        }
        if !json {
            println!();
        }
    }
}

pub(crate) async fn run_cli(cli: Cli) -> Result<()> {
    let runtime = build_runtime(&cli)?;
    match &cli.command {
        CliCommand::Watch {
            interval_ms,
            cycles,
        } => run_watch(&runtime, *interval_ms, *cycles, cli.json).await,
        command => {
            let rendered = execute(&runtime, command, cli.json).await?;
            println!("{rendered}");
            Ok(())
        }
    }
}
