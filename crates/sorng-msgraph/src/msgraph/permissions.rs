//! Permission management for items in a user's drive.
//!
//! Get, update, and remove permissions on individual files and folders.

use crate::msgraph::api_client::GraphApiClient;
use crate::msgraph::error::GraphResult;
use crate::msgraph::request::{segment, GraphRequest};
use crate::msgraph::types::{OneOrMany, Permission};
use log::{debug, info};
use serde_json::json;

/// Permission operations.
pub struct GraphPermissions<'a> {
    client: &'a GraphApiClient,
}

impl<'a> GraphPermissions<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    fn collection_path(user_id: &str, item_id: &str) -> GraphResult<String> {
        Ok(format!(
            "/users/{}/drive/items/{}/permissions",
            segment("user id", user_id)?,
            segment("item id", item_id)?
        ))
    }

    fn permission_path(user_id: &str, item_id: &str, permission_id: &str) -> GraphResult<String> {
        Ok(format!(
            "{}/{}",
            Self::collection_path(user_id, item_id)?,
            segment("permission id", permission_id)?
        ))
    }

    /// Without `permission_id` this targets the collection; with it, the
    /// single permission.
    pub fn get_permission_request(
        user_id: &str,
        item_id: &str,
        permission_id: Option<&str>,
    ) -> GraphResult<GraphRequest> {
        match permission_id {
            Some(id) => Ok(GraphRequest::get(Self::permission_path(user_id, item_id, id)?)),
            None => Ok(GraphRequest::get(Self::collection_path(user_id, item_id)?).many()),
        }
    }

    pub fn update_permission_roles_request(
        user_id: &str,
        item_id: &str,
        permission_id: &str,
        roles: &[String],
    ) -> GraphResult<GraphRequest> {
        Ok(
            GraphRequest::patch(Self::permission_path(user_id, item_id, permission_id)?)
                .json(json!({ "roles": roles })),
        )
    }

    pub fn update_permission_request(
        user_id: &str,
        item_id: &str,
        permission_id: &str,
    ) -> GraphResult<GraphRequest> {
        Self::update_permission_roles_request(user_id, item_id, permission_id, &["read".to_string()])
    }

    pub fn delete_permission_request(
        user_id: &str,
        item_id: &str,
        permission_id: &str,
    ) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::delete(Self::permission_path(
            user_id,
            item_id,
            permission_id,
        )?))
    }

    /// Get every permission on an item, or one permission by ID.
    pub async fn get_permission(
        &self,
        user_id: &str,
        item_id: &str,
        permission_id: Option<&str>,
    ) -> GraphResult<OneOrMany<Permission>> {
        let perms = self
            .client
            .execute(Self::get_permission_request(user_id, item_id, permission_id)?)
            .await?;
        if let OneOrMany::Many(ref list) = perms {
            debug!("Item {} has {} permissions", item_id, list.len());
        }
        Ok(perms)
    }

    /// Downgrade a permission to read-only.
    pub async fn update_permission(
        &self,
        user_id: &str,
        item_id: &str,
        permission_id: &str,
    ) -> GraphResult<Permission> {
        self.update_permission_roles(user_id, item_id, permission_id, &["read".to_string()])
            .await
    }

    /// Replace the roles of a permission.
    pub async fn update_permission_roles(
        &self,
        user_id: &str,
        item_id: &str,
        permission_id: &str,
        roles: &[String],
    ) -> GraphResult<Permission> {
        let perm: Permission = self
            .client
            .execute_one(Self::update_permission_roles_request(
                user_id,
                item_id,
                permission_id,
                roles,
            )?)
            .await?;
        info!(
            "Updated permission {} on item {} to roles {:?}",
            permission_id, item_id, roles
        );
        Ok(perm)
    }

    /// Remove a permission.
    pub async fn delete_permission(
        &self,
        user_id: &str,
        item_id: &str,
        permission_id: &str,
    ) -> GraphResult<serde_json::Value> {
        let resp = self
            .client
            .execute_raw(Self::delete_permission_request(
                user_id,
                item_id,
                permission_id,
            )?)
            .await?;
        info!("Removed permission {} from item {}", permission_id, item_id);
        Ok(resp)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgraph::request::Cardinality;
    use crate::msgraph::transport::{GraphResponse, RecordingTransport};

    #[test]
    fn test_get_permission_collection_vs_single() {
        let all = GraphPermissions::get_permission_request("u1", "i1", None).unwrap();
        assert_eq!(all.to_string(), "GET /users/u1/drive/items/i1/permissions");
        assert_eq!(all.cardinality(), Cardinality::Many);

        let one = GraphPermissions::get_permission_request("u1", "i1", Some("p1")).unwrap();
        assert_eq!(one.to_string(), "GET /users/u1/drive/items/i1/permissions/p1");
        assert_eq!(one.cardinality(), Cardinality::One);
    }

    #[test]
    fn test_update_permission_sends_read() {
        let req = GraphPermissions::update_permission_request("u1", "i1", "p1").unwrap();
        assert_eq!(req.to_string(), "PATCH /users/u1/drive/items/i1/permissions/p1");
        assert_eq!(req.body(), Some(&serde_json::json!({ "roles": ["read"] })));
    }

    #[test]
    fn test_delete_permission_template() {
        let req = GraphPermissions::delete_permission_request("u1", "i1", "p1").unwrap();
        assert_eq!(req.to_string(), "DELETE /users/u1/drive/items/i1/permissions/p1");
        assert!(req.body().is_none());
    }

    #[test]
    fn test_empty_permission_id_rejected() {
        assert!(GraphPermissions::get_permission_request("u1", "i1", Some("")).is_err());
    }

    #[tokio::test]
    async fn test_get_permission_many() {
        let t = RecordingTransport::new();
        t.push_json(json!({
            "value": [
                { "id": "p1", "roles": ["write"], "grantedTo": { "user": { "id": "u2" } } },
                { "id": "p2", "roles": ["read"], "link": { "type": "view", "scope": "organization" } }
            ]
        }))
        .await;
        let client = GraphApiClient::new(t.clone());

        let perms = client
            .permissions()
            .get_permission("u1", "i1", None)
            .await
            .unwrap()
            .into_vec();
        assert_eq!(perms.len(), 2);
        assert_eq!(perms[0].roles, vec!["write"]);
        let link = perms[1].link.as_ref().unwrap();
        assert_eq!(link.link_type.as_deref(), Some("view"));
        assert_eq!(link.scope.as_deref(), Some("organization"));
    }

    #[tokio::test]
    async fn test_get_permission_one() {
        let t = RecordingTransport::new();
        t.push_json(json!({ "id": "p1", "roles": ["owner"] })).await;
        let client = GraphApiClient::new(t.clone());

        let perm = client
            .permissions()
            .get_permission("u1", "i1", Some("p1"))
            .await
            .unwrap();
        assert!(perm.is_one());
        assert_eq!(perm.one().unwrap().roles, vec!["owner"]);
    }

    #[tokio::test]
    async fn test_update_permission_roles_custom() {
        let t = RecordingTransport::new();
        t.push_json(json!({ "id": "p1", "roles": ["write"] })).await;
        let client = GraphApiClient::new(t.clone());

        let perm = client
            .permissions()
            .update_permission_roles("u1", "i1", "p1", &["write".to_string()])
            .await
            .unwrap();
        assert_eq!(perm.roles, vec!["write"]);
        let sent = t.last_request().await.unwrap();
        assert_eq!(sent.body(), Some(&json!({ "roles": ["write"] })));
    }

    #[tokio::test]
    async fn test_delete_permission_no_content() {
        let t = RecordingTransport::new();
        t.push_response(GraphResponse::new(204, "")).await;
        let client = GraphApiClient::new(t.clone());

        let v = client
            .permissions()
            .delete_permission("u1", "i1", "p1")
            .await
            .unwrap();
        assert!(v.is_null());
    }
}
