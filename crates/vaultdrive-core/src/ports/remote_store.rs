//! Remote storage port (driven/secondary port)
//!
//! This module defines the narrow capability interface the sync logic
//! requires from a remote storage service: list/create/update file and
//! find/create folder. The primary implementation targets Google Drive,
//! but the trait carries no Drive specifics so the engine is testable
//! against an in-memory fake.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification. Any
//!   error propagates and aborts the run; there is no per-call retry.
//! - `RemoteFile` is a port-level DTO, not a domain entity.

use serde::{Deserialize, Serialize};

use crate::domain::newtypes::{Fingerprint, RemoteId};

/// A remote file as reported by the storage service
///
/// The stored fingerprint may be absent: some remote object types carry
/// no content checksum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Provider-specific file identifier
    pub id: RemoteId,
    /// File name
    pub name: String,
    /// Content fingerprint as stored by the remote service
    pub fingerprint: Option<Fingerprint>,
}

/// Port trait for remote storage operations
///
/// All queries are scoped to a (name, parent) pair with trashed items
/// excluded, matching the capability contract the sync logic needs.
///
/// ## Implementation Notes
///
/// - When the remote side holds duplicate entries for the same
///   (name, parent) pair, `find_file` returns the first entry of the
///   listing as returned by the service. No dedup or cleanup of the
///   rest is performed; this is a known limitation carried over from
///   the reference behavior.
/// - Folder creation is not atomic with the preceding existence check.
///   Concurrent runs can race and create duplicate folders.
#[async_trait::async_trait]
pub trait IRemoteStore: Send + Sync {
    /// Finds a non-trashed file named `name` under `parent_id`
    ///
    /// # Returns
    /// The first matching file with its stored fingerprint, or `None`
    async fn find_file(&self, name: &str, parent_id: &RemoteId)
        -> anyhow::Result<Option<RemoteFile>>;

    /// Creates a new file named `name` under `parent_id` with the given content
    ///
    /// # Returns
    /// The identifier of the created file
    async fn create_file(
        &self,
        name: &str,
        parent_id: &RemoteId,
        content: Vec<u8>,
    ) -> anyhow::Result<RemoteId>;

    /// Replaces the content of an existing remote file in place
    async fn update_file(&self, id: &RemoteId, content: Vec<u8>) -> anyhow::Result<()>;

    /// Finds a non-trashed folder named `name` under `parent_id`
    async fn find_folder(&self, name: &str, parent_id: &RemoteId)
        -> anyhow::Result<Option<RemoteId>>;

    /// Creates a folder named `name` under `parent_id`
    ///
    /// # Returns
    /// The identifier of the created folder
    async fn create_folder(&self, name: &str, parent_id: &RemoteId) -> anyhow::Result<RemoteId>;
}
