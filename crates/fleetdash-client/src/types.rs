use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// One backend summary endpoint.
pub enum SummarySource {
    /// Token and execution statistics for one agent, addressed by backend key.
    AgentTokens(String),
    TestCaseSummary,
    TestCaseListing,
    TestDataSummary,
    TestDataListing,
    TestScriptSummary,
    JiraSummary,
    TestFailureSummary,
}

impl SummarySource {
    /// Symbolic key the payload is stored under in an aggregated result.
    pub fn source_key(&self) -> &'static str {
        match self {
            Self::AgentTokens(_) => "tokens",
            Self::TestCaseSummary => "testCase",
            Self::TestCaseListing => "testCaseListing",
            Self::TestDataSummary => "testData",
            Self::TestDataListing => "testDataListing",
            Self::TestScriptSummary => "testScript",
            Self::JiraSummary => "jira",
            Self::TestFailureSummary => "testFailure",
        }
    }

    /// Path segments below the API base.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Self::AgentTokens(agent_key) => vec!["api", "tokens", "agent", agent_key.as_str()],
            Self::TestCaseSummary => vec!["api", "testcases", "summary"],
            Self::TestCaseListing => vec!["api", "testcases", "all"],
            Self::TestDataSummary => vec!["api", "testdata", "summary"],
            Self::TestDataListing => vec!["api", "testdata", "all"],
            Self::TestScriptSummary => vec!["api", "testscripts", "summary"],
            Self::JiraSummary => vec!["api", "jira", "summary"],
            Self::TestFailureSummary => vec!["api", "testfailure", "summary"],
        }
    }

    /// Listing endpoints return full record sets and get the listing timeout.
    pub fn is_listing(&self) -> bool {
        matches!(self, Self::TestCaseListing | Self::TestDataListing)
    }
}

#[derive(Debug, Error)]
pub enum SummaryClientError {
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("backend returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
/// Fetches one summary payload. Implementations make a single attempt.
pub trait SummaryClient: Send + Sync {
    async fn fetch(&self, source: &SummarySource) -> Result<Value, SummaryClientError>;
}
