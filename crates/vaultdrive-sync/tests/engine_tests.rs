//! End-to-end engine tests against an in-memory remote store
//!
//! Exercise the walker, the folder resolver, and the per-file decision
//! logic together over real temp directories, with the remote side
//! faked so call counts and stored state can be asserted exactly.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use vaultdrive_core::domain::newtypes::{Fingerprint, RemoteId};
use vaultdrive_core::ports::remote_store::{IRemoteStore, RemoteFile};
use vaultdrive_sync::fingerprint::fingerprint_bytes;
use vaultdrive_sync::SyncEngine;

// ============================================================================
// Fake remote store
// ============================================================================

#[derive(Clone)]
struct FakeFile {
    id: String,
    name: String,
    parent: String,
    fingerprint: Fingerprint,
}

#[derive(Clone)]
struct FakeFolder {
    id: String,
    name: String,
    parent: String,
}

/// In-memory remote store with deterministic ids and call counters.
///
/// Created folders get ids "folder-1", "folder-2", ... in creation
/// order; created files get "file-1", "file-2", ... likewise.
#[derive(Default)]
struct FakeRemoteStore {
    files: Mutex<Vec<FakeFile>>,
    folders: Mutex<Vec<FakeFolder>>,
    next_folder: AtomicU32,
    next_file: AtomicU32,
    find_file_calls: AtomicU32,
    create_file_calls: AtomicU32,
    update_file_calls: AtomicU32,
    find_folder_calls: AtomicU32,
    create_folder_calls: AtomicU32,
}

impl FakeRemoteStore {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds a remote folder without counting it as a created one.
    fn seed_folder(&self, id: &str, name: &str, parent: &str) {
        self.folders.lock().unwrap().push(FakeFolder {
            id: id.to_string(),
            name: name.to_string(),
            parent: parent.to_string(),
        });
    }

    /// Seeds a remote file whose fingerprint matches `content`.
    fn seed_file(&self, id: &str, name: &str, parent: &str, content: &[u8]) {
        self.files.lock().unwrap().push(FakeFile {
            id: id.to_string(),
            name: name.to_string(),
            parent: parent.to_string(),
            fingerprint: fingerprint_bytes(content),
        });
    }

    fn total_calls(&self) -> u32 {
        self.find_file_calls.load(Ordering::SeqCst)
            + self.create_file_calls.load(Ordering::SeqCst)
            + self.update_file_calls.load(Ordering::SeqCst)
            + self.find_folder_calls.load(Ordering::SeqCst)
            + self.create_folder_calls.load(Ordering::SeqCst)
    }

    fn file_names(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.name.clone())
            .collect()
    }

    fn parent_of_file(&self, name: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.parent.clone())
    }
}

#[async_trait::async_trait]
impl IRemoteStore for FakeRemoteStore {
    async fn find_file(
        &self,
        name: &str,
        parent_id: &RemoteId,
    ) -> anyhow::Result<Option<RemoteFile>> {
        self.find_file_calls.fetch_add(1, Ordering::SeqCst);
        let files = self.files.lock().unwrap();
        let found = files
            .iter()
            .find(|f| f.name == name && f.parent == parent_id.as_str())
            .map(|f| RemoteFile {
                id: RemoteId::new(f.id.clone()).unwrap(),
                name: f.name.clone(),
                fingerprint: Some(f.fingerprint.clone()),
            });
        Ok(found)
    }

    async fn create_file(
        &self,
        name: &str,
        parent_id: &RemoteId,
        content: Vec<u8>,
    ) -> anyhow::Result<RemoteId> {
        self.create_file_calls.fetch_add(1, Ordering::SeqCst);
        let id = format!("file-{}", self.next_file.fetch_add(1, Ordering::SeqCst) + 1);
        self.files.lock().unwrap().push(FakeFile {
            id: id.clone(),
            name: name.to_string(),
            parent: parent_id.as_str().to_string(),
            fingerprint: fingerprint_bytes(&content),
        });
        Ok(RemoteId::new(id).unwrap())
    }

    async fn update_file(&self, id: &RemoteId, content: Vec<u8>) -> anyhow::Result<()> {
        self.update_file_calls.fetch_add(1, Ordering::SeqCst);
        let mut files = self.files.lock().unwrap();
        let file = files
            .iter_mut()
            .find(|f| f.id == id.as_str())
            .ok_or_else(|| anyhow::anyhow!("no remote file with id {id}"))?;
        file.fingerprint = fingerprint_bytes(&content);
        Ok(())
    }

    async fn find_folder(
        &self,
        name: &str,
        parent_id: &RemoteId,
    ) -> anyhow::Result<Option<RemoteId>> {
        self.find_folder_calls.fetch_add(1, Ordering::SeqCst);
        let folders = self.folders.lock().unwrap();
        let found = folders
            .iter()
            .find(|f| f.name == name && f.parent == parent_id.as_str())
            .map(|f| RemoteId::new(f.id.clone()).unwrap());
        Ok(found)
    }

    async fn create_folder(&self, name: &str, parent_id: &RemoteId) -> anyhow::Result<RemoteId> {
        self.create_folder_calls.fetch_add(1, Ordering::SeqCst);
        let id = format!(
            "folder-{}",
            self.next_folder.fetch_add(1, Ordering::SeqCst) + 1
        );
        self.folders.lock().unwrap().push(FakeFolder {
            id: id.clone(),
            name: name.to_string(),
            parent: parent_id.as_str().to_string(),
        });
        Ok(RemoteId::new(id).unwrap())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn target_root() -> RemoteId {
    RemoteId::new("target-root").unwrap()
}

fn write_file(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_empty_vault_makes_no_remote_calls() {
    let vault = TempDir::new().unwrap();
    let store = FakeRemoteStore::new();
    let engine = SyncEngine::new(store.clone());

    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.total(), 0);
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_only_allowed_extensions_are_uploaded() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "notes.md", b"keep");
    write_file(vault.path(), "notes.txt", b"skip");
    write_file(vault.path(), "scan.PDF", b"keep too");
    write_file(vault.path(), "photo.jpeg", b"skip, not jpg");

    let store = FakeRemoteStore::new();
    let engine = SyncEngine::new(store.clone());

    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.added, 2);
    let mut names = store.file_names();
    names.sort();
    assert_eq!(names, vec!["notes.md", "scan.PDF"]);
}

#[tokio::test]
async fn test_hidden_files_and_directories_are_excluded() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), ".trash/old.md", b"deleted note");
    write_file(vault.path(), "sub/.hidden.md", b"draft");
    write_file(vault.path(), "sub/normal.md", b"note");

    let store = FakeRemoteStore::new();
    let engine = SyncEngine::new(store.clone());

    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.added, 1);
    assert_eq!(store.file_names(), vec!["normal.md"]);
    // Hidden directory is pruned, so no folder is created for it.
    assert_eq!(store.create_folder_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_nested_folders_are_created_exactly_once() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "a/b/x.md", b"x");
    write_file(vault.path(), "a/b/y.md", b"y");

    let store = FakeRemoteStore::new();
    let engine = SyncEngine::new(store.clone());

    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.added, 2);
    // One create for "a", one for "b"; the second file reuses the cache.
    assert_eq!(store.create_folder_calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.parent_of_file("x.md"), store.parent_of_file("y.md"));
}

#[tokio::test]
async fn test_directories_without_eligible_files_are_mirrored() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "archive/notes.txt", b"filtered out");
    std::fs::create_dir(vault.path().join("drafts")).unwrap();

    let store = FakeRemoteStore::new();
    let engine = SyncEngine::new(store.clone());

    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    // Nothing qualifies for upload, but the folder tree is mirrored.
    assert_eq!(stats.total(), 0);
    assert_eq!(store.create_file_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.create_folder_calls.load(Ordering::SeqCst), 2);

    let folders = store.folders.lock().unwrap();
    let mut names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["archive", "drafts"]);
}

#[tokio::test]
async fn test_mixed_vault_counts_added_updated_unchanged() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "root.md", b"brand new");
    write_file(vault.path(), "notes/old.md", b"same as remote");
    write_file(vault.path(), "notes/changed.md", b"local edit");

    let store = FakeRemoteStore::new();
    // "notes" exists remotely along with both of its files.
    store.seed_folder("notes-id", "notes", "target-root");
    store.seed_file("remote-old", "old.md", "notes-id", b"same as remote");
    store.seed_file("remote-changed", "changed.md", "notes-id", b"remote version");

    let engine = SyncEngine::new(store.clone());
    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.added, 1);
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.unchanged, 1);
    assert_eq!(store.create_folder_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.update_file_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_remote_folder_is_created_once() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "notes/a.md", b"a");
    write_file(vault.path(), "notes/b.md", b"b");

    let store = FakeRemoteStore::new();
    let engine = SyncEngine::new(store.clone());

    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.added, 2);
    assert_eq!(store.create_folder_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.parent_of_file("a.md").unwrap(), "folder-1");
}

#[tokio::test]
async fn test_second_run_is_all_unchanged() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "root.md", b"one");
    write_file(vault.path(), "notes/daily.md", b"two");
    write_file(vault.path(), "notes/deep/idea.md", b"three");

    let store = FakeRemoteStore::new();
    let engine = SyncEngine::new(store.clone());

    let first = engine.sync_vault(vault.path(), &target_root()).await.unwrap();
    assert_eq!(first.added, 3);

    let second = engine.sync_vault(vault.path(), &target_root()).await.unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.unchanged, 3);

    // No content was re-uploaded on the second run.
    assert_eq!(store.create_file_calls.load(Ordering::SeqCst), 3);
    assert_eq!(store.update_file_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unchanged_file_skips_upload_entirely() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "same.md", b"stable content");

    let store = FakeRemoteStore::new();
    store.seed_file("remote-same", "same.md", "target-root", b"stable content");

    let engine = SyncEngine::new(store.clone());
    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.unchanged, 1);
    assert_eq!(store.create_file_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.update_file_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_changed_file_is_updated_in_place() {
    let vault = TempDir::new().unwrap();
    write_file(vault.path(), "draft.md", b"version two");

    let store = FakeRemoteStore::new();
    store.seed_file("remote-draft", "draft.md", "target-root", b"version one");

    let engine = SyncEngine::new(store.clone());
    let stats = engine.sync_vault(vault.path(), &target_root()).await.unwrap();

    assert_eq!(stats.updated, 1);
    assert_eq!(store.create_file_calls.load(Ordering::SeqCst), 0);

    // Remote fingerprint now matches the local content.
    let files = store.files.lock().unwrap();
    assert_eq!(files[0].fingerprint, fingerprint_bytes(b"version two"));
}
