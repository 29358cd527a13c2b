//! Call descriptors for the Graph API.
//!
//! A [`GraphRequest`] is the complete, immutable description of one call:
//! HTTP verb, resource path, query parameters, extra headers, optional JSON
//! body, and whether the reply holds one resource or a collection.  The
//! resource facades only ever build these; sending them is the executor's
//! job.
//!
//! Identifiers are interpolated into paths through [`segment`] and
//! [`drive_path`], which reject empty / dot segments and percent-encode
//! anything that would change the shape of the URL.

use crate::msgraph::error::{GraphError, GraphResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;
use std::fmt;

/// Characters that must not appear raw inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters escaped inside a query-string key or value.
///
/// `$`, `:`, `@` and `'` stay literal so OData parameters remain readable.
pub(crate) const QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Whether a response carries one resource or an OData collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Immutable description of a single Graph call.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    cardinality: Cardinality,
}

impl GraphRequest {
    /// Start a descriptor for `method` on `path` (relative to the Graph base URL).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            cardinality: Cardinality::One,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    // ─── Builder ─────────────────────────────────────────────────────

    /// Append a query parameter.  Order is preserved.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a request header for this call only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Declare that the response is an OData collection.
    pub fn many(mut self) -> Self {
        self.cardinality = Cardinality::Many;
        self
    }

    /// Declare that the response is a single resource (the default).
    pub fn one(mut self) -> Self {
        self.cardinality = Cardinality::One;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Path plus the query string as written, without percent-encoding.
    pub fn target(&self) -> String {
        self.render_target(|s| s.to_string())
    }

    /// Path plus the percent-encoded query string, ready to append to a base URL.
    pub fn encoded_target(&self) -> String {
        self.render_target(|s| utf8_percent_encode(s, QUERY).to_string())
    }

    fn render_target(&self, encode: impl Fn(&str) -> String) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let qs = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, qs)
    }
}

impl fmt::Display for GraphRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.target())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Path helpers
// ═══════════════════════════════════════════════════════════════════════

/// Validate and encode an identifier used as exactly one path segment.
///
/// `what` names the identifier in the error message (e.g. `"user id"`).
pub fn segment(what: &str, value: &str) -> GraphResult<String> {
    check_segment(what, value)?;
    Ok(utf8_percent_encode(value, SEGMENT).to_string())
}

/// Validate and encode a drive-relative path such as `docs/report.pdf`.
///
/// `/` separators are kept; each segment is encoded on its own.  A leading
/// `/` is ignored.
pub fn drive_path(value: &str) -> GraphResult<String> {
    let trimmed = value.trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(GraphError::invalid_identifier(
            "drive path",
            "must not be empty",
        ));
    }
    let parts = trimmed
        .split('/')
        .map(|part| {
            check_segment("drive path", part)?;
            Ok(utf8_percent_encode(part, SEGMENT).to_string())
        })
        .collect::<GraphResult<Vec<_>>>()?;
    Ok(parts.join("/"))
}

fn check_segment(what: &str, value: &str) -> GraphResult<()> {
    if value.is_empty() {
        return Err(GraphError::invalid_identifier(what, "must not be empty"));
    }
    if value == "." || value == ".." {
        return Err(GraphError::invalid_identifier(
            what,
            format!("'{}' is not a valid segment", value),
        ));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
