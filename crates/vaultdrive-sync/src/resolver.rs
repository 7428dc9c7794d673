//! Remote folder resolution
//!
//! Maps vault-relative directory paths to remote folder ids, creating
//! missing folders on the way down. Resolved ids are cached for the
//! duration of a run so each directory costs at most one find (plus one
//! create) per run, regardless of how many files it contains.
//!
//! The find-then-create sequence is not atomic: a concurrent run can
//! create the same folder between the two calls, leaving duplicates on
//! the remote side. Runs are expected to be serialized externally.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use vaultdrive_core::domain::newtypes::{RemoteId, VaultPath};
use vaultdrive_core::ports::remote_store::IRemoteStore;

/// Resolves vault directories to remote folder ids with a per-run cache.
pub struct FolderResolver {
    store: Arc<dyn IRemoteStore>,
    cache: HashMap<VaultPath, RemoteId>,
}

impl FolderResolver {
    /// Creates a resolver rooted at `target_root`, the remote folder that
    /// mirrors the vault root.
    pub fn new(store: Arc<dyn IRemoteStore>, target_root: RemoteId) -> Self {
        let mut cache = HashMap::new();
        cache.insert(VaultPath::root(), target_root);
        Self { store, cache }
    }

    /// Resolves a vault-relative directory to its remote folder id,
    /// creating any missing folders along the path.
    ///
    /// Segments are resolved from the root down so every intermediate
    /// directory is cached too; repeated calls for siblings reuse the
    /// shared prefix without further remote calls.
    pub async fn resolve(&mut self, dir: &VaultPath) -> Result<RemoteId> {
        if let Some(id) = self.cache.get(dir) {
            debug!(path = %dir, folder_id = %id, "Folder cache hit");
            return Ok(id.clone());
        }

        let mut current = self
            .cache
            .get(&VaultPath::root())
            .context("Folder cache missing the vault root entry")?
            .clone();
        let mut walked = VaultPath::root();

        for segment in dir.segments() {
            walked = walked.join(segment);
            current = match self.cache.get(&walked) {
                Some(id) => id.clone(),
                None => {
                    let id = self.find_or_create(segment, &current, &walked).await?;
                    self.cache.insert(walked.clone(), id.clone());
                    id
                }
            };
        }

        Ok(current)
    }

    async fn find_or_create(
        &self,
        name: &str,
        parent: &RemoteId,
        path: &VaultPath,
    ) -> Result<RemoteId> {
        if let Some(id) = self.store.find_folder(name, parent).await? {
            debug!(path = %path, folder_id = %id, "Found existing remote folder");
            return Ok(id);
        }

        let id = self.store.create_folder(name, parent).await?;
        info!(path = %path, folder_id = %id, "Created remote folder");
        Ok(id)
    }
}
