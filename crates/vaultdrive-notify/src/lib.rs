//! VaultDrive Notify - Outbound notification adapters
//!
//! Implements the notification port over Twilio's WhatsApp messaging
//! API. Credentials come from the environment so they never land in the
//! config file.

pub mod twilio;

pub use twilio::{TwilioConfig, TwilioNotifier};
