//! Google Drive REST client
//!
//! Provides a typed HTTP client for the Drive v3 API. Handles
//! authentication headers, base URL construction for the metadata and
//! upload endpoints, and mapping of error statuses to [`DriveError`].
//!
//! There is deliberately no retry or timeout layer here: a failed or hung
//! call surfaces to the caller, which aborts the run.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::DriveError;

/// Base URL for Drive v3 metadata operations
const API_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

/// Base URL for Drive v3 content uploads
const UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/drive/v3";

/// Error body returned by the Drive API on failure
#[derive(Debug, Deserialize)]
struct DriveErrorBody {
    error: Option<DriveErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct DriveErrorDetail {
    message: Option<String>,
}

/// HTTP client for Google Drive API calls
///
/// Wraps `reqwest::Client` with bearer authentication and base URL
/// construction for both the metadata endpoint and the upload endpoint.
pub struct DriveClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for metadata requests
    api_base_url: String,
    /// Base URL for content upload requests
    upload_base_url: String,
    /// Current OAuth2 access token
    access_token: String,
}

impl DriveClient {
    /// Creates a new DriveClient with the given access token
    ///
    /// # Arguments
    /// * `access_token` - A valid OAuth2 access token for the Drive API
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base_url: API_BASE_URL.to_string(),
            upload_base_url: UPLOAD_BASE_URL.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Creates a DriveClient with custom base URLs (useful for testing)
    ///
    /// # Arguments
    /// * `access_token` - A valid OAuth2 access token
    /// * `api_base_url` - Custom base URL for metadata requests
    /// * `upload_base_url` - Custom base URL for upload requests
    pub fn with_base_urls(
        access_token: impl Into<String>,
        api_base_url: impl Into<String>,
        upload_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base_url: api_base_url.into(),
            upload_base_url: upload_base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Returns a reference to the current access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Creates an authenticated request builder against the metadata endpoint
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to the base URL (e.g., "/files")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }

    /// Creates an authenticated request builder against the upload endpoint
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to the upload base URL
    pub fn upload_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.upload_base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.access_token)
    }
}

/// Maps a non-success Drive response to a [`DriveError`]
///
/// Reads the response body and extracts the Drive error message when the
/// body is the standard `{"error": {"message": ...}}` shape.
pub async fn error_for_drive_status(response: Response) -> Result<Response, DriveError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<DriveErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or(body);

    debug!(status = %status, message = %message, "Drive API returned error status");

    Err(match status {
        StatusCode::UNAUTHORIZED => DriveError::Unauthorized(message),
        StatusCode::FORBIDDEN => DriveError::Forbidden(message),
        StatusCode::NOT_FOUND => DriveError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => DriveError::RateLimited(message),
        s if s.is_server_error() => DriveError::ServerError(message),
        s => DriveError::InvalidResponse(format!("unexpected status {s}: {message}")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_client_creation() {
        let client = DriveClient::new("test-token");
        assert_eq!(client.access_token(), "test-token");
    }

    #[test]
    fn test_request_builder() {
        let client = DriveClient::new("test-token");
        let request = client.request(Method::GET, "/files").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://www.googleapis.com/drive/v3/files"
        );
        let auth_header = request
            .headers()
            .get("authorization")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(auth_header, "Bearer test-token");
    }

    #[test]
    fn test_upload_request_builder() {
        let client = DriveClient::new("test-token");
        let request = client
            .upload_request(Method::PATCH, "/files/abc?uploadType=media")
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://www.googleapis.com/upload/drive/v3/files/abc?uploadType=media"
        );
    }

    #[test]
    fn test_custom_base_urls() {
        let client =
            DriveClient::with_base_urls("token", "http://localhost:8080", "http://localhost:8081");
        let request = client.request(Method::GET, "/files").build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/files");

        let upload = client
            .upload_request(Method::PATCH, "/files/x")
            .build()
            .unwrap();
        assert_eq!(upload.url().as_str(), "http://localhost:8081/files/x");
    }

    #[test]
    fn test_error_body_deserialization() {
        let json = r#"{"error": {"code": 404, "message": "File not found: abc"}}"#;
        let body: DriveErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.error.unwrap().message.unwrap(),
            "File not found: abc"
        );
    }
}
