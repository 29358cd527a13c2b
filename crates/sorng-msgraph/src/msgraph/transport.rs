//! Transport abstraction for Graph calls.
//!
//! The executor never talks to the network directly: it hands each
//! [`GraphRequest`] to a [`GraphTransport`] and gets back the raw status and
//! body.  [`ReqwestTransport`] is the production implementation;
//! [`RecordingTransport`] keeps everything in memory for tests and offline
//! use.

use crate::msgraph::auth::TokenProvider;
use crate::msgraph::error::{GraphError, GraphResult};
use crate::msgraph::request::GraphRequest;
use crate::msgraph::types::GraphConfig;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Transport trait
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Raw HTTP outcome of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphResponse {
    pub status: u16,
    pub body: String,
}

impl GraphResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 with a JSON body.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one call descriptor and returns the raw response.
///
/// Implementations return `Err` only when no HTTP response was obtained;
/// non-2xx statuses come back as `Ok` and are judged by the executor.
/// Implementations must be `Send + Sync` so a single instance can be shared
/// behind an `Arc` by every facade.
#[async_trait]
pub trait GraphTransport: Send + Sync {
    async fn send(&self, request: &GraphRequest) -> GraphResult<GraphResponse>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  reqwest transport
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Graph transport over `reqwest::Client` with bearer-token injection.
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ReqwestTransport {
    /// Create a new transport.
    pub fn new(config: &GraphConfig, tokens: Arc<dyn TokenProvider>) -> GraphResult<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| GraphError::invalid_request(format!("Invalid user agent: {}", e)))?;
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                GraphError::invalid_request(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            inner,
            base_url: config.graph_base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Full URL for a call descriptor.
    pub fn url(&self, request: &GraphRequest) -> GraphResult<reqwest::Url> {
        let target = request.encoded_target();
        let full = format!("{}/{}", self.base_url, target.trim_start_matches('/'));
        Ok(reqwest::Url::parse(&full)?)
    }

    fn build(&self, request: &GraphRequest, token: &str) -> GraphResult<reqwest::RequestBuilder> {
        let url = self.url(request)?;
        let mut builder = self
            .inner
            .request(request.method().clone(), url)
            .bearer_auth(token);

        for (name, value) in request.headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                GraphError::invalid_request(format!("Invalid header name '{}': {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                GraphError::invalid_request(format!("Invalid header value: {}", e))
            })?;
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        Ok(builder)
    }
}

#[async_trait]
impl GraphTransport for ReqwestTransport {
    async fn send(&self, request: &GraphRequest) -> GraphResult<GraphResponse> {
        let token = self.tokens.access_token().await?;
        let builder = self.build(request, &token)?;

        let resp = builder.send().await.map_err(GraphError::from)?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| GraphError::from(e).with_status(status))?;

        debug!("Response status={} body_len={}", status, body.len());
        Ok(GraphResponse { status, body })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Recording transport (for testing & offline use)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An in-memory transport that records every request and replays
/// scripted responses in order, then falls back to a fixed response.
pub struct RecordingTransport {
    requests: Mutex<Vec<GraphRequest>>,
    scripted: Mutex<VecDeque<GraphResult<GraphResponse>>>,
    fallback: GraphResponse,
}

impl RecordingTransport {
    /// Transport that answers every call with `200 {}` unless scripted.
    pub fn new() -> Arc<Self> {
        Self::with_fallback(GraphResponse::new(200, "{}"))
    }

    /// Transport that answers unscripted calls with `fallback`.
    pub fn with_fallback(fallback: GraphResponse) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            scripted: Mutex::new(VecDeque::new()),
            fallback,
        })
    }

    /// Queue a response for the next unanswered call.
    pub async fn push_response(&self, response: GraphResponse) {
        self.scripted.lock().await.push_back(Ok(response));
    }

    /// Queue a JSON body with status 200.
    pub async fn push_json(&self, value: serde_json::Value) {
        self.push_response(GraphResponse::json(&value)).await;
    }

    /// Queue a transport failure (no HTTP response at all).
    pub async fn push_failure(&self, err: GraphError) {
        self.scripted.lock().await.push_back(Err(err));
    }

    /// Every request sent so far, oldest first.
    pub async fn requests(&self) -> Vec<GraphRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent request.
    pub async fn last_request(&self) -> Option<GraphRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl GraphTransport for RecordingTransport {
    async fn send(&self, request: &GraphRequest) -> GraphResult<GraphResponse> {
        self.requests.lock().await.push(request.clone());
        match self.scripted.lock().await.pop_front() {
            Some(scripted) => scripted,
            None => Ok(self.fallback.clone()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
