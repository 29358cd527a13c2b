//! Sharing invitations and sharing links.
//!
//! Both operations take a caller-supplied options map that becomes the
//! request body.  For `invite`, the options are copied first and the
//! `recipients` list built from the email addresses is written last, so a
//! caller-supplied `recipients` key never replaces it.

use crate::msgraph::api_client::GraphApiClient;
use crate::msgraph::error::GraphResult;
use crate::msgraph::request::{segment, GraphRequest};
use crate::msgraph::types::{DriveRecipient, Permission};
use log::info;
use serde_json::{Map, Value};

/// Sharing operations.
pub struct GraphSharing<'a> {
    client: &'a GraphApiClient,
}

impl<'a> GraphSharing<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    fn item_action(user_id: &str, item_id: &str, action: &str) -> GraphResult<String> {
        Ok(format!(
            "/users/{}/drive/items/{}/{}",
            segment("user id", user_id)?,
            segment("item id", item_id)?,
            action
        ))
    }

    /// Body for an invite: caller options, then `recipients`.
    pub fn invite_body<S: AsRef<str>>(
        recipients: &[S],
        options: Map<String, Value>,
    ) -> GraphResult<Value> {
        let recipients: Vec<DriveRecipient> = recipients
            .iter()
            .map(|email| DriveRecipient::email(email.as_ref()))
            .collect();

        let mut body = options;
        body.insert("recipients".into(), serde_json::to_value(recipients)?);
        Ok(Value::Object(body))
    }

    pub fn invite_request<S: AsRef<str>>(
        user_id: &str,
        item_id: &str,
        recipients: &[S],
        options: Map<String, Value>,
    ) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::post(Self::item_action(user_id, item_id, "invite")?)
            .json(Self::invite_body(recipients, options)?)
            .many())
    }

    pub fn create_link_request(
        user_id: &str,
        item_id: &str,
        options: Map<String, Value>,
    ) -> GraphResult<GraphRequest> {
        Ok(
            GraphRequest::post(Self::item_action(user_id, item_id, "createLink")?)
                .json(Value::Object(options)),
        )
    }

    /// Send sharing invitations to `recipients` (email addresses).
    ///
    /// Typical options: `requireSignIn`, `sendInvitation`, `roles`,
    /// `message`.  Graph answers with one permission per recipient.
    pub async fn invite<S: AsRef<str>>(
        &self,
        user_id: &str,
        item_id: &str,
        recipients: &[S],
        options: Map<String, Value>,
    ) -> GraphResult<Vec<Permission>> {
        let perms: Vec<Permission> = self
            .client
            .execute_many(Self::invite_request(user_id, item_id, recipients, options)?)
            .await?;
        info!(
            "Invited {} recipient(s) to item {} ({} permission(s) granted)",
            recipients.len(),
            item_id,
            perms.len()
        );
        Ok(perms)
    }

    /// Create a sharing link.  `options` is sent as-is, e.g.
    /// `{"type": "view", "scope": "organization"}`.
    pub async fn create_link(
        &self,
        user_id: &str,
        item_id: &str,
        options: Map<String, Value>,
    ) -> GraphResult<Permission> {
        let perm: Permission = self
            .client
            .execute_one(Self::create_link_request(user_id, item_id, options)?)
            .await?;
        info!(
            "Created sharing link for item {} (type={})",
            item_id,
            perm.link
                .as_ref()
                .and_then(|l| l.link_type.as_deref())
                .unwrap_or("unknown")
        );
        Ok(perm)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
