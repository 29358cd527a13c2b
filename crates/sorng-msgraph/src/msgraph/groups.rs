//! Group search by display name.

use crate::msgraph::api_client::GraphApiClient;
use crate::msgraph::error::{GraphError, GraphResult};
use crate::msgraph::request::GraphRequest;
use crate::msgraph::types::{Group, DEFAULT_PAGE_SIZE};
use log::debug;

/// Groups operations.
pub struct GraphGroups<'a> {
    client: &'a GraphApiClient,
}

impl<'a> GraphGroups<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    /// `$search` requires advanced query mode, which Graph only enables
    /// with `ConsistencyLevel: eventual`.
    pub fn get_groups_request(name: &str, limit: Option<u32>) -> GraphResult<GraphRequest> {
        if name.is_empty() {
            return Err(GraphError::invalid_identifier(
                "group name",
                "must not be empty",
            ));
        }
        let clause = format!("\"displayName:{}\"", name.replace('"', "\\\""));
        Ok(GraphRequest::get("/groups")
            .query("$top", limit.unwrap_or(DEFAULT_PAGE_SIZE).to_string())
            .query("$search", clause)
            .header("ConsistencyLevel", "eventual")
            .many())
    }

    /// Search groups whose display name matches `name`.
    pub async fn get_groups(&self, name: &str, limit: Option<u32>) -> GraphResult<Vec<Group>> {
        let groups: Vec<Group> = self
            .client
            .execute_many(Self::get_groups_request(name, limit)?)
            .await?;
        debug!("Group search '{}' matched {} group(s)", name, groups.len());
        Ok(groups)
    }
}
