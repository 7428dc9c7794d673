//! Shared test helpers for Drive API integration tests
//!
//! Provides wiremock-based mock server setup for the Drive v3 endpoints.
//! The same mock server backs both the metadata base URL and the upload
//! base URL; the two request families use disjoint paths and methods.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaultdrive_drive::client::DriveClient;
use vaultdrive_drive::store::DriveStore;

/// Starts a mock server and returns it with a DriveStore pointing at it.
pub async fn setup_drive_mock() -> (MockServer, DriveStore) {
    let server = MockServer::start().await;
    let client = DriveClient::with_base_urls("test-access-token", server.uri(), server.uri());
    (server, DriveStore::new(client))
}

/// Mounts a `GET /files` listing for the given `q` filter.
pub async fn mount_listing(server: &MockServer, q: &str, files: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/files"))
        .and(query_param("q", q))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "files": files })),
        )
        .mount(server)
        .await;
}

/// Mounts a `POST /files` metadata-create endpoint returning `id`.
pub async fn mount_create(server: &MockServer, id: &str) {
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": id })),
        )
        .mount(server)
        .await;
}

/// Mounts the media-upload endpoint for a specific file id.
pub async fn mount_media_upload(server: &MockServer, id: &str) {
    let upload_path = format!("/files/{id}");
    Mock::given(method("PATCH"))
        .and(path(&upload_path))
        .and(query_param("uploadType", "media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": id,
            "name": "uploaded"
        })))
        .mount(server)
        .await;
}
