//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! mostly validation failures raised by the newtype constructors.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote object identifier
    #[error("Invalid remote ID: {0}")]
    InvalidRemoteId(String),

    /// Invalid content fingerprint (expected 32 hex characters)
    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    /// Invalid vault-relative path
    #[error("Invalid vault path: {0}")]
    InvalidVaultPath(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
