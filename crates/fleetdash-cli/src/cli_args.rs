use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fleetdash_client::{DEFAULT_LISTING_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS};

const DEFAULT_WATCH_INTERVAL_MS: u64 = 5_000;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "fleetdash",
    about = "Terminal dashboard for agent fleet summaries",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "FLEETDASH_API_BASE",
        default_value = "http://127.0.0.1:8080",
        global = true,
        help = "Base URL of the agent summary backend."
    )]
    pub api_base: String,

    #[arg(
        long,
        env = "FLEETDASH_REQUEST_TIMEOUT_MS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_MS,
        value_parser = parse_positive_u64,
        global = true,
        help = "Timeout in milliseconds for summary endpoints."
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long,
        env = "FLEETDASH_LISTING_TIMEOUT_MS",
        default_value_t = DEFAULT_LISTING_TIMEOUT_MS,
        value_parser = parse_positive_u64,
        global = true,
        help = "Timeout in milliseconds for the test case and test data listings."
    )]
    pub listing_timeout_ms: u64,

    #[arg(
        long,
        env = "FLEETDASH_AGENT_REGISTRY",
        global = true,
        help = "TOML file replacing the built-in agent registry."
    )]
    pub agent_registry: Option<PathBuf>,

    #[arg(long, global = true, help = "Print views as pretty JSON.")]
    pub json: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// List registered agents with their backend keys
    Agents,
    /// Show the summary view for one agent
    Summary {
        /// Agent display name, e.g. "Jira Management Agent"
        #[arg(long)]
        agent: String,
    },
    /// Show the orchestrator aggregate view
    Orchestrator,
    /// Show the generated test case listing
    TestCases,
    /// Show the test data listing
    TestData,
    /// Refresh the orchestrator view on an interval
    Watch {
        #[arg(long, default_value_t = DEFAULT_WATCH_INTERVAL_MS, value_parser = parse_positive_u64)]
        interval_ms: u64,
        /// Stop after this many refreshes
        #[arg(long, value_parser = parse_positive_u64)]
        cycles: Option<u64>,
    },
}
