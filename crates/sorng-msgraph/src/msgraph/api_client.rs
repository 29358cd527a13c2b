//! Typed executor and facade entry point for the Microsoft Graph API.
//!
//! `GraphApiClient` owns the injected transport and is the only place a
//! [`GraphRequest`] is actually sent.  Every resource facade funnels through
//! [`GraphApiClient::execute`], so status handling and decoding are the
//! same for every operation: one attempt, HTTP ≥ 400 becomes a
//! `RemoteCallFailure` carrying the untouched status and body, and 2xx
//! bodies are decoded per the descriptor's declared cardinality.

use crate::msgraph::auth::TokenProvider;
use crate::msgraph::drives::GraphDrives;
use crate::msgraph::error::{GraphError, GraphResult};
use crate::msgraph::files::GraphFiles;
use crate::msgraph::groups::GraphGroups;
use crate::msgraph::messages::GraphMessages;
use crate::msgraph::permissions::GraphPermissions;
use crate::msgraph::planner::GraphPlanner;
use crate::msgraph::request::{Cardinality, GraphRequest};
use crate::msgraph::sharing::GraphSharing;
use crate::msgraph::transport::{GraphResponse, GraphTransport, ReqwestTransport};
use crate::msgraph::types::{GraphConfig, ODataCollection, OneOrMany};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Graph client: one shared transport, many resource facades.
#[derive(Clone)]
pub struct GraphApiClient {
    transport: Arc<dyn GraphTransport>,
}

impl GraphApiClient {
    /// Wrap an existing transport.
    pub fn new(transport: Arc<dyn GraphTransport>) -> Self {
        Self { transport }
    }

    /// Build a client backed by [`ReqwestTransport`].
    pub fn from_config(
        config: &GraphConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> GraphResult<Self> {
        let transport = ReqwestTransport::new(config, tokens)?;
        Ok(Self::new(Arc::new(transport)))
    }

    // ─── Facades ─────────────────────────────────────────────────────

    pub fn drives(&self) -> GraphDrives<'_> {
        GraphDrives::new(self)
    }

    pub fn files(&self) -> GraphFiles<'_> {
        GraphFiles::new(self)
    }

    pub fn permissions(&self) -> GraphPermissions<'_> {
        GraphPermissions::new(self)
    }

    pub fn sharing(&self) -> GraphSharing<'_> {
        GraphSharing::new(self)
    }

    pub fn groups(&self) -> GraphGroups<'_> {
        GraphGroups::new(self)
    }

    pub fn messages(&self) -> GraphMessages<'_> {
        GraphMessages::new(self)
    }

    pub fn planner(&self) -> GraphPlanner<'_> {
        GraphPlanner::new(self)
    }

    // ─── Execution ───────────────────────────────────────────────────

    /// Send a descriptor and decode the reply per its declared cardinality.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: GraphRequest,
    ) -> GraphResult<OneOrMany<T>> {
        let cardinality = request.cardinality();
        let resp = self.dispatch(&request).await?;

        match cardinality {
            Cardinality::One => {
                let value: T = serde_json::from_str(&resp.body).map_err(|e| {
                    GraphError::decode(format!("{}: expected a single resource: {}", request, e))
                })?;
                Ok(OneOrMany::One(value))
            }
            Cardinality::Many => {
                let page: ODataCollection<T> = serde_json::from_str(&resp.body).map_err(|e| {
                    GraphError::decode(format!("{}: expected a collection: {}", request, e))
                })?;
                debug!("{} returned {} item(s)", request, page.value.len());
                Ok(OneOrMany::Many(page.value))
            }
        }
    }

    /// Send a descriptor declared as [`Cardinality::One`].
    pub async fn execute_one<T: DeserializeOwned>(&self, request: GraphRequest) -> GraphResult<T> {
        match self.execute(request).await? {
            OneOrMany::One(v) => Ok(v),
            OneOrMany::Many(_) => Err(GraphError::decode(
                "request declares a collection; use execute_many",
            )),
        }
    }

    /// Send a descriptor declared as [`Cardinality::Many`].
    pub async fn execute_many<T: DeserializeOwned>(
        &self,
        request: GraphRequest,
    ) -> GraphResult<Vec<T>> {
        match self.execute(request).await? {
            OneOrMany::Many(v) => Ok(v),
            OneOrMany::One(_) => Err(GraphError::decode(
                "request declares a single resource; use execute_one",
            )),
        }
    }

    /// Send a descriptor and return the body as untyped JSON.
    ///
    /// An empty body (e.g. `204 No Content`) yields `Value::Null`.
    pub async fn execute_raw(&self, request: GraphRequest) -> GraphResult<serde_json::Value> {
        let resp = self.dispatch(&request).await?;
        if resp.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&resp.body).map_err(GraphError::from)
    }

    // ─── Internal ────────────────────────────────────────────────────

    async fn dispatch(&self, request: &GraphRequest) -> GraphResult<GraphResponse> {
        debug!("{}", request);

        let resp = self.transport.send(request).await.map_err(|e| {
            warn!("{} failed: {}", request, e);
            e
        })?;

        if resp.status >= 400 {
            warn!("{} → HTTP {}", request, resp.status);
            return Err(GraphError::remote(resp.status, &resp.body));
        }
        Ok(resp)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgraph::error::GraphErrorKind;
    use crate::msgraph::transport::RecordingTransport;
    use crate::msgraph::types::Drive;
    use serde_json::json;

    fn client() -> (Arc<RecordingTransport>, GraphApiClient) {
        let t = RecordingTransport::new();
        (t.clone(), GraphApiClient::new(t))
    }

    #[tokio::test]
    async fn test_execute_one() {
        let (t, c) = client();
        t.push_json(json!({ "id": "d1", "driveType": "business" })).await;
        let drive: Drive = c.execute_one(GraphRequest::get("/drives/d1")).await.unwrap();
        assert_eq!(drive.id, "d1");
        assert_eq!(drive.drive_type.as_deref(), Some("business"));
    }

    #[tokio::test]
    async fn test_execute_many_keeps_order() {
        let (t, c) = client();
        t.push_json(json!({ "value": [{ "id": "b" }, { "id": "a" }, { "id": "c" }] })).await;
        let drives: Vec<Drive> = c
            .execute_many(GraphRequest::get("/drives").many())
            .await
            .unwrap();
        let ids: Vec<_> = drives.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_empty_collection_is_success() {
        let (t, c) = client();
        t.push_json(json!({ "value": [] })).await;
        let drives: Vec<Drive> = c
            .execute_many(GraphRequest::get("/drives").many())
            .await
            .unwrap();
        assert!(drives.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_element_fails_whole_call() {
        let (t, c) = client();
        t.push_json(json!({ "value": [{ "id": "ok" }, { "name": "no id" }] })).await;
        let err = c
            .execute_many::<Drive>(GraphRequest::get("/drives").many())
            .await
            .unwrap_err();
        assert_eq!(err.kind, GraphErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_cardinality_mismatch() {
        let (t, c) = client();
        t.push_json(json!({ "value": [] })).await;
        let err = c
            .execute_one::<Drive>(GraphRequest::get("/drives").many())
            .await
            .unwrap_err();
        assert_eq!(err.kind, GraphErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_http_error_passthrough() {
        let (t, c) = client();
        let body = r#"{"error":{"code":"itemNotFound","message":"gone"}}"#;
        t.push_response(GraphResponse::new(404, body)).await;
        let err = c
            .execute_one::<Drive>(GraphRequest::get("/drives/x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, GraphErrorKind::RemoteCallFailure);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.body.as_deref(), Some(body));
    }

    #[tokio::test]
    async fn test_transport_error_passthrough() {
        let (t, c) = client();
        let original = GraphError::transport("dns failure");
        t.push_failure(original.clone()).await;
        let err = c.execute_raw(GraphRequest::delete("/x")).await.unwrap_err();
        assert_eq!(err.kind, original.kind);
        assert_eq!(err.message, original.message);
        assert_eq!(err.cause, original.cause);
    }

    #[tokio::test]
    async fn test_execute_raw_empty_body() {
        let (t, c) = client();
        t.push_response(GraphResponse::new(204, "")).await;
        let v = c.execute_raw(GraphRequest::delete("/x")).await.unwrap();
        assert!(v.is_null());
    }

    #[tokio::test]
    async fn test_from_config_builds() {
        let c = GraphApiClient::from_config(
            &GraphConfig::default(),
            Arc::new(crate::msgraph::auth::StaticTokenProvider::new("tok")),
        );
        assert!(c.is_ok());
    }
}
