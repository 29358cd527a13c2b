//! Mailbox access: inbox listing, attachments, and soft delete.
//!
//! "Deleting" a message moves it to the well-known `deletedItems` folder
//! rather than issuing a `DELETE`, so the message stays recoverable.

use crate::msgraph::api_client::GraphApiClient;
use crate::msgraph::error::GraphResult;
use crate::msgraph::request::{segment, GraphRequest};
use crate::msgraph::types::{Attachment, FileAttachment, Message, DEFAULT_PAGE_SIZE};
use log::{debug, info};
use serde_json::json;

/// Well-known folder name used as the move target by `delete_message`.
pub const DELETED_ITEMS_FOLDER: &str = "deletedItems";

/// Mail operations.
pub struct GraphMessages<'a> {
    client: &'a GraphApiClient,
}

impl<'a> GraphMessages<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    fn message_path(user_id: &str, message_id: &str) -> GraphResult<String> {
        Ok(format!(
            "/users/{}/messages/{}",
            segment("user id", user_id)?,
            segment("message id", message_id)?
        ))
    }

    pub fn get_messages_request(user_id: &str, limit: Option<u32>) -> GraphResult<GraphRequest> {
        let path = format!(
            "/users/{}/mailFolders/inbox/messages",
            segment("user id", user_id)?
        );
        Ok(GraphRequest::get(path)
            .query("$top", limit.unwrap_or(DEFAULT_PAGE_SIZE).to_string())
            .many())
    }

    pub fn get_attachments_request(user_id: &str, message_id: &str) -> GraphResult<GraphRequest> {
        let path = format!("{}/attachments", Self::message_path(user_id, message_id)?);
        Ok(GraphRequest::get(path).many())
    }

    pub fn get_file_attachment_request(
        user_id: &str,
        message_id: &str,
        attachment_id: &str,
    ) -> GraphResult<GraphRequest> {
        let path = format!(
            "{}/attachments/{}",
            Self::message_path(user_id, message_id)?,
            segment("attachment id", attachment_id)?
        );
        Ok(GraphRequest::get(path))
    }

    pub fn delete_message_request(user_id: &str, message_id: &str) -> GraphResult<GraphRequest> {
        let path = format!("{}/move", Self::message_path(user_id, message_id)?);
        Ok(GraphRequest::post(path).json(json!({ "destinationId": DELETED_ITEMS_FOLDER })))
    }

    /// First page of the user's inbox.
    pub async fn get_messages(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> GraphResult<Vec<Message>> {
        let msgs: Vec<Message> = self
            .client
            .execute_many(Self::get_messages_request(user_id, limit)?)
            .await?;
        debug!("Fetched {} inbox message(s) for {}", msgs.len(), user_id);
        Ok(msgs)
    }

    pub async fn get_attachments(
        &self,
        user_id: &str,
        message_id: &str,
    ) -> GraphResult<Vec<Attachment>> {
        self.client
            .execute_many(Self::get_attachments_request(user_id, message_id)?)
            .await
    }

    /// A single file attachment including its base64 `contentBytes`.
    pub async fn get_file_attachment(
        &self,
        user_id: &str,
        message_id: &str,
        attachment_id: &str,
    ) -> GraphResult<FileAttachment> {
        self.client
            .execute_one(Self::get_file_attachment_request(
                user_id,
                message_id,
                attachment_id,
            )?)
            .await
    }

    /// Move a message to Deleted Items.  Returns the moved message, which
    /// has a new ID.
    pub async fn delete_message(&self, user_id: &str, message_id: &str) -> GraphResult<Message> {
        let moved: Message = self
            .client
            .execute_one(Self::delete_message_request(user_id, message_id)?)
            .await?;
        info!(
            "Moved message {} of {} to {} (now {})",
            message_id, user_id, DELETED_ITEMS_FOLDER, moved.id
        );
        Ok(moved)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msgraph::request::Cardinality;
    use crate::msgraph::transport::RecordingTransport;

    #[test]
    fn test_templates() {
        assert_eq!(
            GraphMessages::get_messages_request("u1", None)
                .unwrap()
                .to_string(),
            "GET /users/u1/mailFolders/inbox/messages?$top=10"
        );
        let atts = GraphMessages::get_attachments_request("u1", "m1").unwrap();
        assert_eq!(atts.to_string(), "GET /users/u1/messages/m1/attachments");
        assert_eq!(atts.cardinality(), Cardinality::Many);
        assert_eq!(
            GraphMessages::get_file_attachment_request("u1", "m1", "a1")
                .unwrap()
                .to_string(),
            "GET /users/u1/messages/m1/attachments/a1"
        );
    }

    #[test]
    fn test_delete_message_is_move() {
        let req = GraphMessages::delete_message_request("u1", "m1").unwrap();
        assert_eq!(req.to_string(), "POST /users/u1/messages/m1/move");
        assert_eq!(req.body(), Some(&json!({ "destinationId": "deletedItems" })));
        assert_eq!(req.cardinality(), Cardinality::One);
    }

    #[tokio::test]
    async fn test_get_messages_decodes() {
        let t = RecordingTransport::new();
        t.push_json(json!({
            "value": [{
                "id": "m1",
                "subject": "Quarterly report",
                "bodyPreview": "See attached",
                "from": { "emailAddress": { "name": "Ada", "address": "ada@contoso.com" } },
                "toRecipients": [{ "emailAddress": { "address": "u1@contoso.com" } }],
                "hasAttachments": true,
                "isRead": false,
                "parentFolderId": "inbox-id"
            }]
        }))
        .await;
        let client = GraphApiClient::new(t.clone());

        let msgs = client.messages().get_messages("u1", Some(1)).await.unwrap();
        assert_eq!(msgs.len(), 1);
        let m = &msgs[0];
        assert_eq!(m.subject.as_deref(), Some("Quarterly report"));
        assert_eq!(m.has_attachments, Some(true));
        assert_eq!(
            m.from
                .as_ref()
                .and_then(|r| r.email_address.as_ref())
                .and_then(|e| e.address.as_deref()),
            Some("ada@contoso.com")
        );
        assert_eq!(m.to_recipients.len(), 1);
        assert!(m.cc_recipients.is_empty());
    }

    #[tokio::test]
    async fn test_get_attachments_keeps_type() {
        let t = RecordingTransport::new();
        t.push_json(json!({
            "value": [
                { "@odata.type": "#microsoft.graph.fileAttachment", "id": "a1", "name": "r.pdf", "size": 10 },
                { "@odata.type": "#microsoft.graph.itemAttachment", "id": "a2", "name": "fwd" }
            ]
        }))
        .await;
        let client = GraphApiClient::new(t.clone());

        let atts = client.messages().get_attachments("u1", "m1").await.unwrap();
        assert!(atts[0].is_file_attachment());
        assert!(!atts[1].is_file_attachment());
    }

    #[tokio::test]
    async fn test_get_file_attachment_content() {
        let t = RecordingTransport::new();
        t.push_json(json!({
            "@odata.type": "#microsoft.graph.fileAttachment",
            "id": "a1",
            "name": "hello.txt",
            "contentType": "text/plain",
            "contentBytes": "aGVsbG8="
        }))
        .await;
        let client = GraphApiClient::new(t.clone());

        let att = client
            .messages()
            .get_file_attachment("u1", "m1", "a1")
            .await
            .unwrap();
        assert_eq!(att.decode_content().unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_delete_message_returns_moved() {
        let t = RecordingTransport::new();
        t.push_json(json!({ "id": "m1-moved", "parentFolderId": "deleted-id" }))
            .await;
        let client = GraphApiClient::new(t.clone());

        let moved = client.messages().delete_message("u1", "m1").await.unwrap();
        assert_eq!(moved.id, "m1-moved");
        assert_eq!(moved.parent_folder_id.as_deref(), Some("deleted-id"));
    }
}
