//! Summary aggregation and dashboard view projection.
//!
//! A refresh cycle fetches every source a view needs concurrently
//! ([`SummaryFetcher`]), projects the settled [`SummaryResult`] into a
//! display-ready view, and publishes it through a [`SummaryBoard`] that drops
//! results from superseded cycles.

pub mod agent_views;
pub mod dashboard_runtime;
pub mod format;
pub mod listings;
pub mod orchestrator_view;
pub mod payload;
pub mod summary_board;
pub mod summary_fetcher;

pub use agent_views::{
    agent_summary_sources, project_agent_summary, AgentDetailView, AgentSummaryView,
    TokenMetricsView,
};
pub use dashboard_runtime::DashboardRuntime;
pub use format::{format_execution_time, format_share, format_time_ago, format_tokens};
pub use listings::{TestCaseListing, TestDataListing};
pub use orchestrator_view::{orchestrator_sources, project_orchestrator, OrchestratorView};
pub use summary_board::{CycleOutcome, CycleTicket, FetchState, Settled, SummaryBoard};
pub use summary_fetcher::{ResultStatus, SourceFailure, SummaryFetcher, SummaryResult};
