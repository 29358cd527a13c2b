//! Planner plans and tasks.

use crate::msgraph::api_client::GraphApiClient;
use crate::msgraph::error::GraphResult;
use crate::msgraph::request::{segment, GraphRequest};
use crate::msgraph::types::{PlannerPlan, PlannerTask, DEFAULT_PAGE_SIZE};

/// Planner operations.
pub struct GraphPlanner<'a> {
    client: &'a GraphApiClient,
}

impl<'a> GraphPlanner<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    pub fn get_plans_request(group_id: &str, limit: Option<u32>) -> GraphResult<GraphRequest> {
        let path = format!("/groups/{}/planner/plans", segment("group id", group_id)?);
        Ok(GraphRequest::get(path)
            .query("$top", limit.unwrap_or(DEFAULT_PAGE_SIZE).to_string())
            .many())
    }

    pub fn get_tasks_request(plan_id: &str, limit: Option<u32>) -> GraphResult<GraphRequest> {
        let path = format!("/planner/plans/{}/tasks", segment("plan id", plan_id)?);
        Ok(GraphRequest::get(path)
            .query("$top", limit.unwrap_or(DEFAULT_PAGE_SIZE).to_string())
            .many())
    }

    /// Plans owned by a group.
    pub async fn get_plans(
        &self,
        group_id: &str,
        limit: Option<u32>,
    ) -> GraphResult<Vec<PlannerPlan>> {
        self.client
            .execute_many(Self::get_plans_request(group_id, limit)?)
            .await
    }

    /// Tasks in a plan.
    pub async fn get_tasks(
        &self,
        plan_id: &str,
        limit: Option<u32>,
    ) -> GraphResult<Vec<PlannerTask>> {
        self.client
            .execute_many(Self::get_tasks_request(plan_id, limit)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgraph::transport::RecordingTransport;
    use serde_json::json;

    #[test]
    fn test_templates() {
        assert_eq!(
            GraphPlanner::get_plans_request("g1", None).unwrap().to_string(),
            "GET /groups/g1/planner/plans?$top=10"
        );
        assert_eq!(
            GraphPlanner::get_tasks_request("p1", Some(50)).unwrap().to_string(),
            "GET /planner/plans/p1/tasks?$top=50"
        );
    }

    #[tokio::test]
    async fn test_get_plans_decodes() {
        let t = RecordingTransport::new();
        t.push_json(json!({
            "value": [{
                "@odata.etag": "W/\"JzEtUGxhbiAgQEBAQEBAQEBAQEBAQEBASCc=\"",
                "id": "p1",
                "title": "Launch",
                "owner": "g1",
                "container": {
                    "containerId": "g1",
                    "type": "group",
                    "url": "https://graph.microsoft.com/v1.0/groups/g1"
                }
            }]
        }))
        .await;
        let client = GraphApiClient::new(t.clone());

        let plans = client.planner().get_plans("g1", None).await.unwrap();
        assert_eq!(plans[0].title.as_deref(), Some("Launch"));
        assert!(plans[0].etag.is_some());
        let container = plans[0].container.as_ref().unwrap();
        assert_eq!(container.container_type.as_deref(), Some("group"));
    }

    #[tokio::test]
    async fn test_get_tasks_decodes() {
        let t = RecordingTransport::new();
        t.push_json(json!({
            "value": [
                {
                    "id": "t1",
                    "planId": "p1",
                    "title": "Draft copy",
                    "percentComplete": 50,
                    "assignments": { "u1": { "orderHint": "8585" } }
                },
                { "id": "t2", "planId": "p1", "title": "Review" }
            ]
        }))
        .await;
        let client = GraphApiClient::new(t.clone());

        let tasks = client.planner().get_tasks("p1", None).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].percent_complete, Some(50));
        assert!(tasks[0].assignments.contains_key("u1"));
        assert!(tasks[1].assignments.is_empty());
    }

    #[tokio::test]
    async fn test_get_tasks_empty() {
        let t = RecordingTransport::new();
        t.push_json(json!({ "value": [] })).await;
        let client = GraphApiClient::new(t.clone());
        assert!(client.planner().get_tasks("p1", None).await.unwrap().is_empty());
    }
}
