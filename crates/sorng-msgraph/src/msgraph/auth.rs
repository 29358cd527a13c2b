//! Bearer-token supply for the reqwest transport.
//!
//! Acquiring tokens (client credentials, device code, refresh) belongs to
//! the hosting application.  This module only defines the seam the
//! transport reads from, plus a fixed-token implementation.

use crate::msgraph::error::{GraphError, GraphResult};
use async_trait::async_trait;
use std::fmt;

/// Source of the access token attached to each Graph request.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current bearer token.  Called once per request.
    async fn access_token(&self) -> GraphResult<String>;
}

/// A token obtained elsewhere and used as-is.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> GraphResult<String> {
        if self.token.is_empty() {
            return Err(GraphError::invalid_request("access token is empty"));
        }
        Ok(self.token.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgraph::error::GraphErrorKind;

    #[test]
    fn test_static_token() {
        let provider = StaticTokenProvider::new("eyJ0eXAi...");
        let token = tokio_test::block_on(provider.access_token()).unwrap();
        assert_eq!(token, "eyJ0eXAi...");
    }

    #[test]
    fn test_empty_token_rejected() {
        let provider = StaticTokenProvider::new("");
        let err = tokio_test::block_on(provider.access_token()).unwrap_err();
        assert_eq!(err.kind, GraphErrorKind::InvalidRequest);
    }

    #[test]
    fn test_debug_redacts() {
        let provider = StaticTokenProvider::new("secret-token");
        let s = format!("{:?}", provider);
        assert!(!s.contains("secret-token"));
    }
}
