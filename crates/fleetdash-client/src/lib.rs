//! Typed client for the agent-summary REST endpoints.
mod http;
mod request;
mod types;

pub use http::{
    HttpSummaryClient, HttpSummaryClientConfig, SourceTimeoutPolicy, DEFAULT_LISTING_TIMEOUT_MS,
    DEFAULT_REQUEST_TIMEOUT_MS,
};
pub use request::{new_request_id, REQUEST_ID_HEADER};
pub use types::{SummaryClient, SummaryClientError, SummarySource};
