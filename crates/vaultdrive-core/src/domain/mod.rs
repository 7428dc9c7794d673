//! Domain module - pure business types
//!
//! Contains the validated newtypes, domain errors, and the per-run
//! synchronization statistics. Nothing in here touches the network or
//! the filesystem.

pub mod errors;
pub mod newtypes;
pub mod stats;

pub use errors::DomainError;
pub use newtypes::{Fingerprint, RemoteId, VaultPath};
pub use stats::{SyncOutcome, SyncStats};
