//! File and folder lookups, folder listings, deletion, and download-URL
//! resolution for items in a user's default drive.
//!
//! Items are addressed either by item ID (`/drive/items/{id}`) or by a
//! path relative to the drive root (`/drive/root:/{path}`).

use crate::msgraph::api_client::GraphApiClient;
use crate::msgraph::error::GraphResult;
use crate::msgraph::request::{drive_path, segment, GraphRequest};
use crate::msgraph::types::{DriveItem, DriveUrl};
use log::{debug, info};

/// OData filter that keeps folder children only.
const FOLDERS_ONLY: (&str, &str) = ("filter", "folder ne null");

/// Drive item operations.
pub struct GraphFiles<'a> {
    client: &'a GraphApiClient,
}

impl<'a> GraphFiles<'a> {
    pub fn new(client: &'a GraphApiClient) -> Self {
        Self { client }
    }

    // ─── Descriptors ─────────────────────────────────────────────────

    fn drive_root(user_id: &str) -> GraphResult<String> {
        Ok(format!("/users/{}/drive", segment("user id", user_id)?))
    }

    fn item_path(user_id: &str, item_id: &str) -> GraphResult<String> {
        Ok(format!(
            "{}/items/{}",
            Self::drive_root(user_id)?,
            segment("item id", item_id)?
        ))
    }

    fn root_path(user_id: &str, path: &str) -> GraphResult<String> {
        Ok(format!("{}/root:/{}", Self::drive_root(user_id)?, drive_path(path)?))
    }

    pub fn get_file_request(user_id: &str, path: &str) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::get(Self::root_path(user_id, path)?))
    }

    pub fn get_file_by_id_request(user_id: &str, file_id: &str) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::get(Self::item_path(user_id, file_id)?))
    }

    pub fn get_folder_by_id_request(user_id: &str, item_id: &str) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::get(Self::item_path(user_id, item_id)?))
    }

    pub fn get_folder_by_path_request(user_id: &str, path: &str) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::get(Self::root_path(user_id, path)?))
    }

    pub fn get_root_folders_request(user_id: &str) -> GraphResult<GraphRequest> {
        let path = format!("{}/root/children", Self::drive_root(user_id)?);
        Ok(GraphRequest::get(path)
            .query(FOLDERS_ONLY.0, FOLDERS_ONLY.1)
            .many())
    }

    pub fn get_list_folders_by_id_request(
        user_id: &str,
        item_id: &str,
    ) -> GraphResult<GraphRequest> {
        let path = format!("{}/children", Self::item_path(user_id, item_id)?);
        Ok(GraphRequest::get(path)
            .query(FOLDERS_ONLY.0, FOLDERS_ONLY.1)
            .many())
    }

    pub fn get_list_folders_by_path_request(
        user_id: &str,
        path: &str,
    ) -> GraphResult<GraphRequest> {
        let path = format!("{}:/children", Self::root_path(user_id, path)?);
        Ok(GraphRequest::get(path)
            .query(FOLDERS_ONLY.0, FOLDERS_ONLY.1)
            .many())
    }

    pub fn get_list_files_request(user_id: &str, item_id: &str) -> GraphResult<GraphRequest> {
        let path = format!("{}/children", Self::item_path(user_id, item_id)?);
        Ok(GraphRequest::get(path).many())
    }

    pub fn delete_file_request(user_id: &str, item_id: &str) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::delete(Self::item_path(user_id, item_id)?))
    }

    pub fn download_file_request(user_id: &str, item_id: &str) -> GraphResult<GraphRequest> {
        Ok(GraphRequest::get(Self::item_path(user_id, item_id)?)
            .query("select", "@microsoft.graph.downloadUrl"))
    }

    // ─── Read ────────────────────────────────────────────────────────

    /// Get a file by drive-relative path (e.g. `docs/report.pdf`).
    pub async fn get_file(&self, user_id: &str, path: &str) -> GraphResult<DriveItem> {
        self.client
            .execute_one(Self::get_file_request(user_id, path)?)
            .await
    }

    /// Get a file by item ID.
    pub async fn get_file_by_id(&self, user_id: &str, file_id: &str) -> GraphResult<DriveItem> {
        self.client
            .execute_one(Self::get_file_by_id_request(user_id, file_id)?)
            .await
    }

    /// Get a folder by item ID.
    pub async fn get_folder_by_id(&self, user_id: &str, item_id: &str) -> GraphResult<DriveItem> {
        self.client
            .execute_one(Self::get_folder_by_id_request(user_id, item_id)?)
            .await
    }

    /// Get a folder by drive-relative path.
    pub async fn get_folder_by_path(&self, user_id: &str, path: &str) -> GraphResult<DriveItem> {
        self.client
            .execute_one(Self::get_folder_by_path_request(user_id, path)?)
            .await
    }

    // ─── Listings ────────────────────────────────────────────────────

    /// Folders directly under the drive root.
    pub async fn get_root_folders(&self, user_id: &str) -> GraphResult<Vec<DriveItem>> {
        let folders: Vec<DriveItem> = self
            .client
            .execute_many(Self::get_root_folders_request(user_id)?)
            .await?;
        debug!("User {} has {} root folder(s)", user_id, folders.len());
        Ok(folders)
    }

    /// Folders directly under the folder with `item_id`.
    pub async fn get_list_folders_by_id(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> GraphResult<Vec<DriveItem>> {
        self.client
            .execute_many(Self::get_list_folders_by_id_request(user_id, item_id)?)
            .await
    }

    /// Folders directly under the folder at `path`.
    pub async fn get_list_folders_by_path(
        &self,
        user_id: &str,
        path: &str,
    ) -> GraphResult<Vec<DriveItem>> {
        self.client
            .execute_many(Self::get_list_folders_by_path_request(user_id, path)?)
            .await
    }

    /// All children (files and folders) of the folder with `item_id`.
    pub async fn get_list_files(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> GraphResult<Vec<DriveItem>> {
        let items: Vec<DriveItem> = self
            .client
            .execute_many(Self::get_list_files_request(user_id, item_id)?)
            .await?;
        debug!("Listed {} children of {}", items.len(), item_id);
        Ok(items)
    }

    // ─── Delete / download ───────────────────────────────────────────

    /// Delete an item.  Returns whatever the service sent back
    /// (usually an empty `204`, i.e. `Value::Null`).
    pub async fn delete_file(&self, user_id: &str, item_id: &str) -> GraphResult<serde_json::Value> {
        let resp = self
            .client
            .execute_raw(Self::delete_file_request(user_id, item_id)?)
            .await?;
        info!("Deleted item {} of user {}", item_id, user_id);
        Ok(resp)
    }

    /// Resolve the short-lived pre-authenticated download URL of a file.
    pub async fn download_file(&self, user_id: &str, item_id: &str) -> GraphResult<DriveUrl> {
        self.client
            .execute_one(Self::download_file_request(user_id, item_id)?)
            .await
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
