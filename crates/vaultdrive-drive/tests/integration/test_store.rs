//! Integration tests for DriveStore against a mocked Drive v3 API

use vaultdrive_core::domain::newtypes::RemoteId;
use vaultdrive_core::ports::remote_store::IRemoteStore;
use vaultdrive_drive::client::DriveClient;
use vaultdrive_drive::store::DriveStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

fn root() -> RemoteId {
    RemoteId::new("root-folder-id").unwrap()
}

// ============================================================================
// find_file
// ============================================================================

#[tokio::test]
async fn test_find_file_returns_first_match_with_fingerprint() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_listing(
        &server,
        "name = 'note.md' and 'root-folder-id' in parents and trashed = false",
        serde_json::json!([
            {"id": "file-1", "name": "note.md", "md5Checksum": "d41d8cd98f00b204e9800998ecf8427e"},
            {"id": "file-2", "name": "note.md", "md5Checksum": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}
        ]),
    )
    .await;

    let found = store.find_file("note.md", &root()).await.unwrap().unwrap();

    // Duplicate (name, parent) entries: first listing entry wins.
    assert_eq!(found.id.as_str(), "file-1");
    assert_eq!(found.name, "note.md");
    assert_eq!(
        found.fingerprint.unwrap().as_str(),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
}

#[tokio::test]
async fn test_find_file_returns_none_when_absent() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_listing(
        &server,
        "name = 'missing.md' and 'root-folder-id' in parents and trashed = false",
        serde_json::json!([]),
    )
    .await;

    let found = store.find_file("missing.md", &root()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_file_without_checksum_has_no_fingerprint() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_listing(
        &server,
        "name = 'doc.md' and 'root-folder-id' in parents and trashed = false",
        serde_json::json!([{"id": "file-9", "name": "doc.md"}]),
    )
    .await;

    let found = store.find_file("doc.md", &root()).await.unwrap().unwrap();
    assert!(found.fingerprint.is_none());
}

#[tokio::test]
async fn test_find_file_escapes_quotes_in_query() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_listing(
        &server,
        "name = 'it\\'s a note.md' and 'root-folder-id' in parents and trashed = false",
        serde_json::json!([]),
    )
    .await;

    // The assertion is the mock match itself: an unescaped name would 404.
    let found = store.find_file("it's a note.md", &root()).await.unwrap();
    assert!(found.is_none());
}

// ============================================================================
// create_file / update_file
// ============================================================================

#[tokio::test]
async fn test_create_file_posts_metadata_then_uploads_content() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_create(&server, "new-file-id").await;
    common::mount_media_upload(&server, "new-file-id").await;

    let id = store
        .create_file("note.md", &root(), b"# Title".to_vec())
        .await
        .unwrap();

    assert_eq!(id.as_str(), "new-file-id");

    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("metadata create request");
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body["name"], "note.md");
    assert_eq!(body["parents"][0], "root-folder-id");

    let upload = requests
        .iter()
        .find(|r| r.method.as_str() == "PATCH")
        .expect("media upload request");
    assert_eq!(upload.body, b"# Title");
}

#[tokio::test]
async fn test_update_file_replaces_content_in_place() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_media_upload(&server, "existing-id").await;

    let id = RemoteId::new("existing-id").unwrap();
    store
        .update_file(&id, b"new content".to_vec())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, b"new content");
}

// ============================================================================
// find_folder / create_folder
// ============================================================================

#[tokio::test]
async fn test_find_folder_uses_folder_mime_predicate() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_listing(
        &server,
        "mimeType = 'application/vnd.google-apps.folder' and name = 'notes' and 'root-folder-id' in parents and trashed = false",
        serde_json::json!([{"id": "folder-7", "name": "notes"}]),
    )
    .await;

    let found = store.find_folder("notes", &root()).await.unwrap();
    assert_eq!(found.unwrap().as_str(), "folder-7");
}

#[tokio::test]
async fn test_create_folder_sends_mime_type() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_create(&server, "created-folder-id").await;

    let id = store.create_folder("daily", &root()).await.unwrap();
    assert_eq!(id.as_str(), "created-folder-id");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["name"], "daily");
    assert_eq!(body["mimeType"], "application/vnd.google-apps.folder");
    assert_eq!(body["parents"][0], "root-folder-id");
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_list_error_on_401_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {
                "code": 401,
                "message": "Invalid Credentials"
            }
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_urls("expired-token", server.uri(), server.uri());
    let store = DriveStore::new(client);

    let err = store.find_file("note.md", &root()).await.unwrap_err();
    assert!(format!("{err:#}").contains("Invalid Credentials"));
}

#[tokio::test]
async fn test_create_folder_error_on_500_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": {
                "code": 500,
                "message": "Backend Error"
            }
        })))
        .mount(&server)
        .await;

    let client = DriveClient::with_base_urls("token", server.uri(), server.uri());
    let store = DriveStore::new(client);

    let result = store.create_folder("notes", &root()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_upload_error_propagates_from_create_file() {
    let (server, store) = common::setup_drive_mock().await;

    common::mount_create(&server, "half-created-id").await;

    Mock::given(method("PATCH"))
        .and(path("/files/half-created-id"))
        .and(query_param("uploadType", "media"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {
                "code": 403,
                "message": "The user does not have sufficient permissions"
            }
        })))
        .mount(&server)
        .await;

    let result = store
        .create_file("note.md", &root(), b"content".to_vec())
        .await;
    assert!(result.is_err());
}
