//! VaultDrive Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `RemoteId`, `Fingerprint`, `VaultPath`, `SyncStats`
//! - **Port definitions** - Traits for adapters: `IRemoteStore`, `INotifier`
//! - **Configuration** - YAML config with defaults and validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement, so the sync
//! logic is testable against in-memory fakes, decoupled from Google Drive
//! and Twilio.

pub mod config;
pub mod domain;
pub mod ports;
