//! VaultDrive Drive - Google Drive API adapter
//!
//! Provides an async client for:
//! - OAuth2 authentication (Authorization Code with PKCE)
//! - Drive file operations (list, create, update content, create folder)
//!
//! ## Modules
//!
//! - [`auth`] - OAuth2 PKCE authentication flow components
//! - [`client`] - Google Drive REST client
//! - [`store`] - [`IRemoteStore`] implementation over Drive v3
//!
//! [`IRemoteStore`]: vaultdrive_core::ports::remote_store::IRemoteStore

pub mod auth;
pub mod client;
pub mod store;

use thiserror::Error;

/// Errors that can occur when communicating with the Google Drive API
///
/// None of these are retried: any Drive error propagates and aborts the
/// sync run.
#[derive(Debug, Error)]
pub enum DriveError {
    /// Authentication credentials are invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit or quota exceeded
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
