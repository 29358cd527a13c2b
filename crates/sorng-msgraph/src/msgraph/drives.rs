//! Drive enumeration for a user.

use crate::msgraph::api_client::GraphApiClient;
use crate::msgraph::error::GraphResult;
use crate::msgraph::request::{segment, GraphRequest};
use crate::msgraph::types::{Drive, DEFAULT_PAGE_SIZE};
use log::debug;

/// Drive operations.
pub struct GraphDrives<'a> {
    client: &'a GraphApiClient,
}

impl<'a> GraphDrives<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    pub fn get_drives_request(user_id: &str, limit: Option<u32>) -> GraphResult<GraphRequest> {
        let path = format!("/users/{}/drives", segment("user id", user_id)?);
        Ok(GraphRequest::get(path)
            .query("$top", limit.unwrap_or(DEFAULT_PAGE_SIZE).to_string())
            .many())
    }

    /// List the drives of a user (first page only, `limit` defaults to 10).
    pub async fn get_drives(&self, user_id: &str, limit: Option<u32>) -> GraphResult<Vec<Drive>> {
        let drives: Vec<Drive> = self
            .client
            .execute_many(Self::get_drives_request(user_id, limit)?)
            .await?;
        debug!("User {} has {} drive(s) on this page", user_id, drives.len());
        Ok(drives)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
