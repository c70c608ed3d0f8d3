use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use serde_json::Value;

use crate::request::{error_body_preview, new_request_id, REQUEST_ID_HEADER};
use crate::{SummaryClient, SummaryClientError, SummarySource};

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LISTING_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Client-side timeout applied to every source, by endpoint class.
pub struct SourceTimeoutPolicy {
    pub request_timeout_ms: u64,
    pub listing_timeout_ms: u64,
}

impl Default for SourceTimeoutPolicy {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            listing_timeout_ms: DEFAULT_LISTING_TIMEOUT_MS,
        }
    }
}

impl SourceTimeoutPolicy {
    pub fn timeout_ms_for(&self, source: &SummarySource) -> u64 {
        let timeout_ms = if source.is_listing() {
            self.listing_timeout_ms
        } else {
            self.request_timeout_ms
        };
        timeout_ms.max(1)
    }
}

#[derive(Debug, Clone)]
pub struct HttpSummaryClientConfig {
    pub api_base: String,
    pub timeouts: SourceTimeoutPolicy,
}

#[derive(Debug, Clone)]
/// `SummaryClient` over HTTP GET + JSON.
pub struct HttpSummaryClient {
    client: reqwest::Client,
    api_base: Url,
    timeouts: SourceTimeoutPolicy,
}

impl HttpSummaryClient {
    pub fn new(config: HttpSummaryClientConfig) -> Result<Self, SummaryClientError> {
        let raw_base = config.api_base.trim();
        if raw_base.is_empty() {
            return Err(SummaryClientError::InvalidConfig(
                "api base cannot be empty".to_string(),
            ));
        }
        let api_base = Url::parse(raw_base).map_err(|error| {
            SummaryClientError::InvalidConfig(format!("invalid api base '{raw_base}': {error}"))
        })?;
        if !matches!(api_base.scheme(), "http" | "https") || api_base.cannot_be_a_base() {
            return Err(SummaryClientError::InvalidConfig(format!(
                "api base '{raw_base}' must be an http(s) URL"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_base,
            timeouts: config.timeouts,
        })
    }

    pub fn timeouts(&self) -> SourceTimeoutPolicy {
        self.timeouts
    }

    pub fn source_url(&self, source: &SummarySource) -> Result<Url, SummaryClientError> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                SummaryClientError::InvalidConfig(format!(
                    "api base '{}' cannot carry a path",
                    self.api_base
                ))
            })?;
            segments.pop_if_empty();
            segments.extend(source.path_segments());
        }
        Ok(url)
    }
}

#[async_trait]
impl SummaryClient for HttpSummaryClient {
    async fn fetch(&self, source: &SummarySource) -> Result<Value, SummaryClientError> {
        let url = self.source_url(source)?;
        let timeout_ms = self.timeouts.timeout_ms_for(source);
        let request_id = new_request_id();
        tracing::debug!(
            source = source.source_key(),
            url = %url,
            request_id = %request_id,
            timeout_ms,
            "dispatching summary request"
        );

        let response = self
            .client
            .get(url)
            .header(REQUEST_ID_HEADER, request_id)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|error| classify_transport_error(error, timeout_ms))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|error| classify_transport_error(error, timeout_ms))?;
        if !status.is_success() {
            return Err(SummaryClientError::HttpStatus {
                status: status.as_u16(),
                body: error_body_preview(&raw),
            });
        }

        Ok(serde_json::from_str(&raw)?)
    }
}

fn classify_transport_error(error: reqwest::Error, timeout_ms: u64) -> SummaryClientError {
    if error.is_timeout() {
        SummaryClientError::Timeout { timeout_ms }
    } else {
        SummaryClientError::Http(error)
    }
}
