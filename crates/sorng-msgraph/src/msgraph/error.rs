//! Error types for the Microsoft Graph resource client.
//!
//! All public API surfaces in this crate return `GraphResult<T>`.  Remote
//! failures are never reclassified: the HTTP status and the raw response
//! body reach the caller exactly as the service produced them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Convenience alias.
pub type GraphResult<T> = Result<T, GraphError>;

/// What went wrong, at the granularity this layer can know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphErrorKind {
    /// The transport failed or the service answered with HTTP ≥ 400.
    RemoteCallFailure,
    /// An identifier or drive path was rejected before any request was sent.
    InvalidIdentifier,
    /// A successful response did not match the declared result shape.
    Decode,
    /// A call descriptor could not be turned into an HTTP request.
    InvalidRequest,
}

impl fmt::Display for GraphErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Structured error returned by every public function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphError {
    pub kind: GraphErrorKind,
    pub message: String,
    /// HTTP status, absent when the request never got a response.
    pub status: Option<u16>,
    /// Raw response body, unmodified.
    pub body: Option<String>,
    /// `error.code` from Graph's JSON error envelope, when present.
    pub graph_error_code: Option<String>,
    /// `error.innerError.request-id`, when present.
    pub request_id: Option<String>,
    /// Rendered transport-level cause (connect / timeout / TLS).
    pub cause: Option<String>,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        if let Some(ref gc) = self.graph_error_code {
            write!(f, " (graph: {})", gc)?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphError {}

impl GraphError {
    /// Create from a kind + message.
    pub fn new(kind: GraphErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            status: None,
            body: None,
            graph_error_code: None,
            request_id: None,
            cause: None,
        }
    }

    /// Shortcut: rejected identifier.
    pub fn invalid_identifier(what: &str, msg: impl Into<String>) -> Self {
        Self::new(
            GraphErrorKind::InvalidIdentifier,
            format!("invalid {}: {}", what, msg.into()),
        )
    }

    /// Shortcut: response did not decode.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::Decode, msg)
    }

    /// Shortcut: descriptor could not be sent.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::InvalidRequest, msg)
    }

    /// Transport failure without an HTTP response.
    pub fn transport(cause: impl Into<String>) -> Self {
        let cause = cause.into();
        Self {
            message: format!("Graph request failed: {}", cause),
            cause: Some(cause),
            ..Self::new(GraphErrorKind::RemoteCallFailure, "")
        }
    }

    /// Build an error from a Graph API error response.
    ///
    /// The status and body are kept verbatim; the JSON error envelope is only
    /// read to fill in the convenience fields.
    pub fn remote(status: u16, body: &str) -> Self {
        let (graph_code, inner_msg, request_id) = Self::parse_graph_error_body(body);

        let message =
            inner_msg.unwrap_or_else(|| format!("Graph API error (HTTP {})", status));

        Self {
            kind: GraphErrorKind::RemoteCallFailure,
            message,
            status: Some(status),
            body: Some(body.to_string()),
            graph_error_code: graph_code,
            request_id,
            cause: None,
        }
    }

    /// Attach the HTTP status of a response whose body could not be read.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether this is a remote/transport failure.
    pub fn is_remote(&self) -> bool {
        self.kind == GraphErrorKind::RemoteCallFailure
    }

    /// Try to extract Graph error JSON: `{ "error": { "code": "...", "message": "...", "innerError": { "request-id": "..." } } }`.
    fn parse_graph_error_body(body: &str) -> (Option<String>, Option<String>, Option<String>) {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(body) else {
            return (None, None, None);
        };
        let err = &v["error"];
        let code = err["code"].as_str().map(String::from);
        let msg = err["message"].as_str().map(String::from);
        let req_id = err["innerError"]["request-id"]
            .as_str()
            .map(String::from);
        (code, msg, req_id)
    }
}

impl From<reqwest::Error> for GraphError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self {
                cause: Some(err.to_string()),
                ..Self::remote(status.as_u16(), "")
            },
            None => Self::transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for GraphError {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_request(format!("URL parse error: {}", err))
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
