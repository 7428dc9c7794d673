//! Sync command - Push the local vault to Google Drive
//!
//! Provides the `vaultdrive sync` CLI command which:
//! 1. Loads and validates configuration
//! 2. Obtains OAuth tokens (cached, refreshed, or interactive)
//! 3. Wires up the Drive store and the Twilio notifier
//! 4. Runs the SyncEngine and displays the per-run summary

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use vaultdrive_core::config::Config;
use vaultdrive_core::domain::newtypes::RemoteId;
use vaultdrive_core::ports::notifier::{notify_best_effort, INotifier, NullNotifier};
use vaultdrive_drive::auth::{DriveAuthAdapter, OAuth2Config};
use vaultdrive_drive::client::DriveClient;
use vaultdrive_drive::store::DriveStore;
use vaultdrive_notify::{TwilioConfig, TwilioNotifier};
use vaultdrive_sync::SyncEngine;

use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Skip start/summary notifications for this run
    #[arg(long)]
    pub no_notify: bool,
}

impl SyncCommand {
    /// Execute the sync command
    ///
    /// Wires up the adapters, creates the SyncEngine, runs the push,
    /// and displays the summary.
    pub async fn execute(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        // Step 1: Load and validate config
        let config = Config::load_or_default(config_path);

        info!(config_path = %config_path.display(), "Loaded configuration");

        let errors = config.validate();
        if !errors.is_empty() {
            for error in &errors {
                format.error(&error.to_string());
            }
            anyhow::bail!("Configuration is invalid; fix {} and retry", config_path.display());
        }

        let client_id = config
            .auth
            .client_id
            .clone()
            .context("auth.client_id is not set. Run 'vaultdrive auth login' first")?;

        // Step 2: Obtain tokens (cached / refreshed / interactive)
        let mut oauth_config = OAuth2Config::new(&client_id);
        if let Some(secret) = &config.auth.client_secret {
            oauth_config = oauth_config.with_client_secret(secret);
        }
        let auth = DriveAuthAdapter::new(oauth_config);
        let tokens = auth.obtain().await.context("Authentication failed")?;

        // Step 3: Create adapters
        let client = DriveClient::new(&tokens.access_token);
        let store = Arc::new(DriveStore::new(client));

        let notifier: Box<dyn INotifier> = if self.no_notify {
            Box::new(NullNotifier)
        } else {
            match TwilioConfig::from_env() {
                Ok(twilio) => Box::new(TwilioNotifier::new(twilio)),
                Err(e) => {
                    info!(reason = %e, "Twilio not configured, notifications disabled");
                    Box::new(NullNotifier)
                }
            }
        };

        let target_root = RemoteId::new(config.sync.remote_root_id.clone())
            .context("sync.remote_root_id is invalid")?;

        // Step 4: Run the sync
        notify_best_effort(&*notifier, "Vault sync started.").await;
        format.info("Starting synchronization...");

        let engine = SyncEngine::new(store);
        let result = engine
            .sync_vault(&config.sync.vault_root, &target_root)
            .await;

        // Step 5: Report the outcome, to the terminal and via notification
        match result {
            Ok(stats) => {
                notify_best_effort(
                    &*notifier,
                    &format!(
                        "Vault sync finished. Added: {}, updated: {}, unchanged: {}.",
                        stats.added, stats.updated, stats.unchanged
                    ),
                )
                .await;

                format.sync_summary(&stats);

                Ok(())
            }
            Err(e) => {
                notify_best_effort(&*notifier, &format!("Vault sync failed: {e:#}")).await;
                Err(e)
            }
        }
    }
}
