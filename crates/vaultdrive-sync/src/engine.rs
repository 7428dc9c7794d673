//! Vault traversal and per-file synchronization
//!
//! Walks the local vault depth-first, filters entries down to eligible
//! note and attachment files, and pushes each one to the remote store.
//! The push direction is one-way: local wins, remote-only files are
//! never touched or deleted.
//!
//! Everything runs sequentially. Each remote call completes before the
//! next starts, and the first error aborts the run with partial remote
//! state left as-is.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use vaultdrive_core::domain::newtypes::{RemoteId, VaultPath};
use vaultdrive_core::domain::stats::{SyncOutcome, SyncStats};
use vaultdrive_core::ports::remote_store::IRemoteStore;

use crate::fingerprint::fingerprint_file;
use crate::resolver::FolderResolver;

/// File extensions eligible for synchronization (compared case-insensitively)
pub const ALLOWED_EXTENSIONS: &[&str] = &["md", "pdf", "png", "jpg"];

/// One-way incremental sync engine.
pub struct SyncEngine {
    store: Arc<dyn IRemoteStore>,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn IRemoteStore>) -> Self {
        Self { store }
    }

    /// Synchronizes the vault at `vault_root` into the remote folder
    /// `target_root`.
    ///
    /// Hidden entries (name starting with `.`) are skipped; hidden
    /// directories are pruned without descending. Every visited
    /// directory is mirrored remotely, including directories that hold
    /// no eligible files; the root maps to `target_root` itself.
    pub async fn sync_vault(
        &self,
        vault_root: &Path,
        target_root: &RemoteId,
    ) -> Result<SyncStats> {
        info!(vault = %vault_root.display(), target = %target_root, "Starting vault sync");

        let mut resolver = FolderResolver::new(self.store.clone(), target_root.clone());
        let mut stats = SyncStats::new();

        let mut pending: Vec<(PathBuf, VaultPath)> =
            vec![(vault_root.to_path_buf(), VaultPath::root())];

        while let Some((local_dir, vault_dir)) = pending.pop() {
            // The remote folder is resolved on entry so the directory is
            // mirrored even when nothing inside it qualifies for upload.
            let folder_id = resolver.resolve(&vault_dir).await?;

            let entries = read_dir_sorted(&local_dir).await?;
            let mut subdirs = Vec::new();

            for entry in entries {
                let Some(name) = entry.file_name().and_then(|n| n.to_str()).map(String::from)
                else {
                    warn!(path = %entry.display(), "Skipping entry with non-UTF-8 name");
                    continue;
                };

                if name.starts_with('.') {
                    debug!(path = %entry.display(), "Skipping hidden entry");
                    continue;
                }

                let metadata = tokio::fs::metadata(&entry)
                    .await
                    .with_context(|| format!("Failed to stat {}", entry.display()))?;

                if metadata.is_dir() {
                    subdirs.push((entry, vault_dir.join(&name)));
                } else if extension_allowed(&name) {
                    let outcome = self.sync_file(&entry, &name, &folder_id).await?;
                    stats.record(outcome);
                } else {
                    debug!(path = %entry.display(), "Skipping file with excluded extension");
                }
            }

            // Pushed in reverse so the stack pops subdirectories in
            // lexicographic order.
            pending.extend(subdirs.into_iter().rev());
        }

        info!(%stats, "Vault sync finished");
        Ok(stats)
    }

    /// Synchronizes a single file into the remote folder `folder_id`.
    ///
    /// The decision is fingerprint-driven: no remote counterpart means
    /// create, matching fingerprints mean skip, anything else means a
    /// full content replace.
    async fn sync_file(
        &self,
        local_path: &Path,
        name: &str,
        folder_id: &RemoteId,
    ) -> Result<SyncOutcome> {
        let local_fp = fingerprint_file(local_path).await?;

        let remote = self.store.find_file(name, folder_id).await?;

        match remote {
            None => {
                let content = read_content(local_path).await?;
                let id = self.store.create_file(name, folder_id, content).await?;
                info!(file = name, remote_id = %id, "Uploaded new file");
                Ok(SyncOutcome::Added)
            }
            Some(remote) if remote.fingerprint.as_ref() == Some(&local_fp) => {
                debug!(file = name, "Unchanged, skipping upload");
                Ok(SyncOutcome::Unchanged)
            }
            Some(remote) => {
                let content = read_content(local_path).await?;
                self.store.update_file(&remote.id, content).await?;
                info!(file = name, remote_id = %remote.id, "Updated remote file");
                Ok(SyncOutcome::Updated)
            }
        }
    }
}

/// Returns true if the file name carries one of the allowed extensions.
fn extension_allowed(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        _ => false,
    }
}

async fn read_content(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Lists a directory's entries sorted by file name for deterministic
/// traversal across platforms.
async fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut reader = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .with_context(|| format!("Failed to list directory {}", dir.display()))?
    {
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
