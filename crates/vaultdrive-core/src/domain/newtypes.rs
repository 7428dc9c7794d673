//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for the identifiers and values the sync logic
//! passes around. Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// RemoteId
// ============================================================================

/// Identifier of an object (file or folder) on the remote storage service.
///
/// Opaque string assigned by the remote service; the only local invariant
/// is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    /// Create a RemoteId, rejecting empty strings
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidRemoteId(
                "remote ID must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Fingerprint
// ============================================================================

/// MD5 content fingerprint as a 32-character lowercase hex string.
///
/// The format matches the `md5Checksum` field reported by Google Drive,
/// so local and remote fingerprints compare directly. Construction
/// normalizes case; equality is on the normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Create a Fingerprint from a hex string, validating format
    pub fn new(hex: impl Into<String>) -> Result<Self, DomainError> {
        let hex = hex.into().to_ascii_lowercase();
        if hex.len() != 32 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidFingerprint(format!(
                "expected 32 hex characters, got {hex:?}"
            )));
        }
        Ok(Self(hex))
    }

    /// Create a Fingerprint from a raw 16-byte MD5 digest
    #[must_use]
    pub fn from_digest(digest: [u8; 16]) -> Self {
        let mut hex = String::with_capacity(32);
        for byte in digest {
            use fmt::Write;
            // writing to a String cannot fail
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    /// Get the hex string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// VaultPath
// ============================================================================

/// A path relative to the vault root.
///
/// The empty path denotes the vault root itself. Construction rejects
/// absolute paths and parent (`..`) components so a `VaultPath` can never
/// escape the vault. Used as the key of the per-run folder cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultPath(PathBuf);

impl VaultPath {
    /// Create a VaultPath from a relative path
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            return Err(DomainError::InvalidVaultPath(format!(
                "path must be relative to the vault root: {}",
                path.display()
            )));
        }
        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(DomainError::InvalidVaultPath(format!(
                        "path must not escape the vault root: {}",
                        path.display()
                    )))
                }
            }
        }
        Ok(Self(path))
    }

    /// The vault root itself (empty relative path)
    #[must_use]
    pub fn root() -> Self {
        Self(PathBuf::new())
    }

    /// Returns true if this path denotes the vault root
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Append a single path segment
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        Self(self.0.join(name))
    }

    /// Ordered path segments from the root down
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
    }

    /// Final segment (file or directory name), if any
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }

    /// The underlying relative path
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl Display for VaultPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0.display())
        }
    }
}
