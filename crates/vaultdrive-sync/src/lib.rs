//! VaultDrive Sync - Incremental vault synchronization engine
//!
//! Provides:
//! - Content fingerprinting (chunked MD5)
//! - Remote folder mirroring with a per-run resolution cache
//! - The vault walker that drives per-file create/update/skip decisions
//!
//! ## Modules
//!
//! - [`fingerprint`] - MD5 content fingerprinting
//! - [`resolver`] - Local path to remote folder id mapping
//! - [`engine`] - Vault traversal and per-file sync
//!
//! Execution is strictly sequential: one remote call completes before the
//! next begins, and the first local or remote error aborts the run.

pub mod engine;
pub mod fingerprint;
pub mod resolver;

pub use engine::{SyncEngine, ALLOWED_EXTENSIONS};
