//! Shared types for the Microsoft Graph resource client.
//!
//! Models cover client configuration, drives, drive items (files &
//! folders), permissions and sharing recipients, groups, mail messages and
//! attachments, Planner plans and tasks, and the OData collection envelope.
//!
//! Top-level resources keep any property they do not model in an
//! `additional` map, so a decoded value carries everything the service sent.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default Graph API base URL.
pub const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Page size used when a listing operation is called without a limit.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ═══════════════════════════════════════════════════════════════════════
//  Configuration
// ═══════════════════════════════════════════════════════════════════════

/// Configuration for the reqwest-backed Graph transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Graph API base URL.  Default: `https://graph.microsoft.com/v1.0`.
    pub graph_base_url: String,
    /// Timeout in seconds for HTTP calls.  Default: 60.
    pub timeout_sec: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            graph_base_url: GRAPH_BASE_URL.into(),
            timeout_sec: 60,
            user_agent: concat!("sorng-msgraph/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Result shapes
// ═══════════════════════════════════════════════════════════════════════

/// OData collection envelope (`{"value": [...]}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ODataCollection<T> {
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    #[serde(rename = "@odata.count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

/// Decoded result of a call whose cardinality is chosen per request.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn is_one(&self) -> bool {
        matches!(self, OneOrMany::One(_))
    }

    /// The single value, if this is `One`.
    pub fn one(self) -> Option<T> {
        match self {
            OneOrMany::One(v) => Some(v),
            OneOrMany::Many(_) => None,
        }
    }

    /// The list, if this is `Many`.
    pub fn many(self) -> Option<Vec<T>> {
        match self {
            OneOrMany::One(_) => None,
            OneOrMany::Many(v) => Some(v),
        }
    }

    /// Flatten into a list (`One` becomes a single-element list).
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Identity
// ═══════════════════════════════════════════════════════════════════════

/// A set of identities (user, application, device, group).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentitySet {
    pub application: Option<Identity>,
    pub device: Option<Identity>,
    pub user: Option<Identity>,
    pub group: Option<Identity>,
}

/// A single identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Drive
// ═══════════════════════════════════════════════════════════════════════

/// A user's drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub drive_type: Option<String>,
    pub owner: Option<IdentitySet>,
    pub quota: Option<DriveQuota>,
    pub web_url: Option<String>,
    pub created_date_time: Option<String>,
    pub last_modified_date_time: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// Drive storage quota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveQuota {
    pub deleted: Option<i64>,
    pub remaining: Option<i64>,
    pub state: Option<String>,
    pub total: Option<i64>,
    pub used: Option<i64>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Drive Items  (files, folders)
// ═══════════════════════════════════════════════════════════════════════

/// A file or folder in a drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    pub id: String,
    pub name: Option<String>,
    pub size: Option<i64>,
    pub web_url: Option<String>,
    pub description: Option<String>,
    pub created_date_time: Option<String>,
    pub last_modified_date_time: Option<String>,
    pub e_tag: Option<String>,
    pub c_tag: Option<String>,
    pub parent_reference: Option<ItemReference>,
    pub file: Option<FileInfo>,
    pub folder: Option<FolderInfo>,
    pub created_by: Option<IdentitySet>,
    pub last_modified_by: Option<IdentitySet>,
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }
}

/// Reference to a parent item / location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReference {
    pub drive_id: Option<String>,
    pub drive_type: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub share_id: Option<String>,
    pub site_id: Option<String>,
}

/// File-specific metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub mime_type: Option<String>,
    pub hashes: Option<FileHashes>,
}

/// Hashes for a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHashes {
    pub crc32_hash: Option<String>,
    pub sha1_hash: Option<String>,
    pub sha256_hash: Option<String>,
    pub quick_xor_hash: Option<String>,
}

/// Folder-specific metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInfo {
    pub child_count: Option<i32>,
}

/// Pre-authenticated download location of a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveUrl {
    pub id: Option<String>,
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    pub download_url: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Permissions & Sharing
// ═══════════════════════════════════════════════════════════════════════

/// A permission on a drive item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub granted_to: Option<IdentitySet>,
    pub granted_to_identities: Option<Vec<IdentitySet>>,
    pub invitation: Option<SharingInvitation>,
    pub inherited_from: Option<ItemReference>,
    pub link: Option<SharingLink>,
    pub share_id: Option<String>,
    pub expiration_date_time: Option<String>,
    pub has_password: Option<bool>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// Sharing link details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingLink {
    pub scope: Option<String>,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
    pub web_url: Option<String>,
    pub prevents_download: Option<bool>,
}

/// Sharing invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingInvitation {
    pub email: Option<String>,
    pub invited_by: Option<IdentitySet>,
    pub sign_in_required: Option<bool>,
}

/// A recipient for a sharing invite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveRecipient {
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    pub email: String,
}

impl DriveRecipient {
    pub const ODATA_TYPE: &'static str = "microsoft.graph.driveRecipient";

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            odata_type: Self::ODATA_TYPE.into(),
            email: email.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Groups
// ═══════════════════════════════════════════════════════════════════════

/// A Microsoft 365 / security group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub mail: Option<String>,
    pub mail_nickname: Option<String>,
    pub mail_enabled: Option<bool>,
    pub security_enabled: Option<bool>,
    #[serde(default)]
    pub group_types: Vec<String>,
    pub visibility: Option<String>,
    pub created_date_time: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Mail
// ═══════════════════════════════════════════════════════════════════════

/// A mailbox message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub subject: Option<String>,
    pub body_preview: Option<String>,
    pub body: Option<ItemBody>,
    pub from: Option<Recipient>,
    pub sender: Option<Recipient>,
    #[serde(default)]
    pub to_recipients: Vec<Recipient>,
    #[serde(default)]
    pub cc_recipients: Vec<Recipient>,
    pub parent_folder_id: Option<String>,
    pub conversation_id: Option<String>,
    pub has_attachments: Option<bool>,
    pub is_read: Option<bool>,
    pub importance: Option<String>,
    pub received_date_time: Option<String>,
    pub sent_date_time: Option<String>,
    pub web_link: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// Message body content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    /// `text` or `html`.
    pub content_type: Option<String>,
    pub content: Option<String>,
}

/// A message recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: Option<EmailAddress>,
}

/// Name + address pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Attachment metadata as returned by the attachments collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// e.g. `#microsoft.graph.fileAttachment`, `#microsoft.graph.itemAttachment`.
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    pub id: String,
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<i64>,
    pub is_inline: Option<bool>,
    pub last_modified_date_time: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl Attachment {
    pub fn is_file_attachment(&self) -> bool {
        self.odata_type.as_deref() == Some("#microsoft.graph.fileAttachment")
    }
}

/// A file attachment including its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    pub id: String,
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<i64>,
    pub is_inline: Option<bool>,
    pub last_modified_date_time: Option<String>,
    pub content_id: Option<String>,
    pub content_location: Option<String>,
    /// Base64-encoded file content.
    pub content_bytes: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl FileAttachment {
    /// Decode `contentBytes`.  An attachment without content yields an empty buffer.
    pub fn decode_content(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match self.content_bytes.as_deref() {
            Some(b64) => base64::engine::general_purpose::STANDARD.decode(b64),
            None => Ok(Vec::new()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Planner
// ═══════════════════════════════════════════════════════════════════════

/// A Planner plan owned by a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerPlan {
    pub id: String,
    pub title: Option<String>,
    pub owner: Option<String>,
    pub container: Option<PlannerPlanContainer>,
    pub created_by: Option<IdentitySet>,
    pub created_date_time: Option<String>,
    #[serde(rename = "@odata.etag")]
    pub etag: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// The resource a plan belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerPlanContainer {
    pub container_id: Option<String>,
    #[serde(rename = "type")]
    pub container_type: Option<String>,
    pub url: Option<String>,
}

/// A task inside a Planner plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerTask {
    pub id: String,
    pub plan_id: Option<String>,
    pub bucket_id: Option<String>,
    pub title: Option<String>,
    pub order_hint: Option<String>,
    pub percent_complete: Option<i32>,
    pub priority: Option<i32>,
    pub start_date_time: Option<String>,
    pub due_date_time: Option<String>,
    pub completed_date_time: Option<String>,
    pub created_date_time: Option<String>,
    pub created_by: Option<IdentitySet>,
    pub has_description: Option<bool>,
    /// Keyed by user id; values are `plannerAssignment` objects.
    #[serde(default)]
    pub assignments: Map<String, Value>,
    #[serde(rename = "@odata.etag")]
    pub etag: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
