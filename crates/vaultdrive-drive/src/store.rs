//! DriveStore - IRemoteStore implementation for the Google Drive v3 API
//!
//! Implements the narrow remote-storage capability port over Drive REST
//! semantics:
//!
//! - Child lookups use a `q` filter combining name-equals, parent-equals
//!   and `trashed = false` (plus the folder mimeType for folder queries).
//! - File creation is a metadata `POST /files` followed by a content
//!   upload with `uploadType=media` against the returned id; content
//!   updates reuse the same media upload.
//!
//! When Drive holds duplicate entries for a (name, parent) pair, the
//! first element of the listing wins and the rest are ignored.

use anyhow::{Context, Result};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use vaultdrive_core::domain::newtypes::{Fingerprint, RemoteId};
use vaultdrive_core::ports::remote_store::{IRemoteStore, RemoteFile};

use crate::client::{error_for_drive_status, DriveClient};

/// Drive mimeType identifying a folder
const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

// ============================================================================
// Drive API response types
// ============================================================================

/// Response from `GET /files` (a file listing)
#[derive(Debug, Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFileItem>,
}

/// A single file resource from a listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFileItem {
    id: String,
    name: String,
    /// Content checksum; absent for folders and some Google-native types
    md5_checksum: Option<String>,
}

/// Response from `POST /files` with `fields=id`
#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

// ============================================================================
// Query construction
// ============================================================================

/// Escapes a value for use inside single quotes in a Drive `q` filter
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Builds the `q` filter for a (name, parent) child lookup
fn child_query(name: &str, parent_id: &RemoteId, folders_only: bool) -> String {
    let name = escape_query_value(name);
    let parent = escape_query_value(parent_id.as_str());
    if folders_only {
        format!(
            "mimeType = '{FOLDER_MIME_TYPE}' and name = '{name}' and '{parent}' in parents and trashed = false"
        )
    } else {
        format!("name = '{name}' and '{parent}' in parents and trashed = false")
    }
}

// ============================================================================
// DriveStore
// ============================================================================

/// Remote storage adapter backed by the Google Drive v3 API
pub struct DriveStore {
    client: DriveClient,
}

impl DriveStore {
    /// Creates a new `DriveStore` wrapping the given [`DriveClient`]
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }

    /// Lists non-trashed children matching `name` under `parent_id`
    async fn list_children(
        &self,
        name: &str,
        parent_id: &RemoteId,
        folders_only: bool,
    ) -> Result<Vec<DriveFileItem>> {
        let q = child_query(name, parent_id, folders_only);
        debug!(%q, "Listing Drive children");

        let response = self
            .client
            .request(Method::GET, "/files")
            .query(&[("q", q.as_str()), ("fields", "files(id,name,md5Checksum)")])
            .send()
            .await
            .context("Failed to send file list request")?;

        let listing: FileListResponse = error_for_drive_status(response)
            .await
            .context("File list request failed")?
            .json()
            .await
            .context("Failed to parse file list response")?;

        Ok(listing.files)
    }

    /// Uploads raw content to an existing file id (`uploadType=media`)
    async fn upload_content(&self, id: &RemoteId, content: Vec<u8>) -> Result<()> {
        let path = format!("/files/{}?uploadType=media", id.as_str());
        debug!(id = %id, bytes = content.len(), "Uploading file content");

        let response = self
            .client
            .upload_request(Method::PATCH, &path)
            .header("Content-Type", "application/octet-stream")
            .body(content)
            .send()
            .await
            .context("Failed to send content upload request")?;

        error_for_drive_status(response)
            .await
            .context("Content upload failed")?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl IRemoteStore for DriveStore {
    /// Finds a non-trashed file named `name` under `parent_id`
    ///
    /// Takes the first entry of the listing; duplicates are ignored.
    async fn find_file(&self, name: &str, parent_id: &RemoteId) -> Result<Option<RemoteFile>> {
        let files = self.list_children(name, parent_id, false).await?;

        let Some(item) = files.into_iter().next() else {
            return Ok(None);
        };

        let fingerprint = item
            .md5_checksum
            .map(Fingerprint::new)
            .transpose()
            .context("Drive returned a malformed md5Checksum")?;

        Ok(Some(RemoteFile {
            id: RemoteId::new(item.id).context("Drive returned an empty file id")?,
            name: item.name,
            fingerprint,
        }))
    }

    /// Creates a new file: metadata first, then the content upload
    async fn create_file(
        &self,
        name: &str,
        parent_id: &RemoteId,
        content: Vec<u8>,
    ) -> Result<RemoteId> {
        debug!(name, parent = %parent_id, "Creating Drive file");

        let metadata = serde_json::json!({
            "name": name,
            "parents": [parent_id.as_str()],
        });

        let response = self
            .client
            .request(Method::POST, "/files")
            .query(&[("fields", "id")])
            .json(&metadata)
            .send()
            .await
            .context("Failed to send file create request")?;

        let created: CreatedResponse = error_for_drive_status(response)
            .await
            .context("File create request failed")?
            .json()
            .await
            .context("Failed to parse file create response")?;

        let id = RemoteId::new(created.id).context("Drive returned an empty file id")?;
        self.upload_content(&id, content).await?;

        Ok(id)
    }

    /// Replaces the content of an existing remote file in place
    async fn update_file(&self, id: &RemoteId, content: Vec<u8>) -> Result<()> {
        self.upload_content(id, content).await
    }

    /// Finds a non-trashed folder named `name` under `parent_id`
    async fn find_folder(&self, name: &str, parent_id: &RemoteId) -> Result<Option<RemoteId>> {
        let folders = self.list_children(name, parent_id, true).await?;

        match folders.into_iter().next() {
            Some(item) => Ok(Some(
                RemoteId::new(item.id).context("Drive returned an empty folder id")?,
            )),
            None => Ok(None),
        }
    }

    /// Creates a folder named `name` under `parent_id`
    async fn create_folder(&self, name: &str, parent_id: &RemoteId) -> Result<RemoteId> {
        debug!(name, parent = %parent_id, "Creating Drive folder");

        let metadata = serde_json::json!({
            "name": name,
            "mimeType": FOLDER_MIME_TYPE,
            "parents": [parent_id.as_str()],
        });

        let response = self
            .client
            .request(Method::POST, "/files")
            .query(&[("fields", "id")])
            .json(&metadata)
            .send()
            .await
            .context("Failed to send folder create request")?;

        let created: CreatedResponse = error_for_drive_status(response)
            .await
            .context("Folder create request failed")?
            .json()
            .await
            .context("Failed to parse folder create response")?;

        RemoteId::new(created.id).context("Drive returned an empty folder id")
    }
}
