//! Content fingerprinting
//!
//! Computes MD5 digests in the format Drive reports as `md5Checksum`,
//! so a local file and its remote counterpart compare without
//! downloading content. Files are read in bounded-size chunks to keep
//! memory flat for arbitrarily large files.

use std::path::Path;

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use tokio::io::AsyncReadExt;

use vaultdrive_core::domain::newtypes::Fingerprint;

/// Read buffer size for chunked hashing
const CHUNK_SIZE: usize = 8192;

/// Computes the content fingerprint of a file.
///
/// Deterministic in the file's byte content only; path and timestamps do
/// not influence the result. An unreadable file is an error that
/// propagates unretried and aborts the file's sync.
pub async fn fingerprint_file(path: &Path) -> Result<Fingerprint> {
    let mut file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {} for fingerprinting", path.display()))?;

    let mut hasher = Md5::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buf)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(Fingerprint::from_digest(hasher.finalize().into()))
}

/// Computes the content fingerprint of an in-memory byte slice.
#[must_use]
pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
    let mut hasher = Md5::new();
    hasher.update(data);
    Fingerprint::from_digest(hasher.finalize().into())
}
