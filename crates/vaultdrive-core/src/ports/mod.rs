//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the sync logic depends on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IRemoteStore`] - Remote storage operations (Google Drive, in-memory fake)
//! - [`INotifier`] - Outbound run notifications (Twilio WhatsApp)

pub mod notifier;
pub mod remote_store;

pub use notifier::{notify_best_effort, INotifier, NullNotifier};
pub use remote_store::{IRemoteStore, RemoteFile};
