//! Auth commands - Login, Logout, and Status for Google Drive authentication
//!
//! Provides the `vaultdrive auth` CLI subcommands which:
//! 1. `login`  - Runs the OAuth2 PKCE flow via DriveAuthAdapter and stores
//!    tokens in the system keyring.
//! 2. `logout` - Clears tokens from the keyring.
//! 3. `status` - Shows token presence and validity.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use vaultdrive_core::config::Config;
use vaultdrive_drive::auth::{DriveAuthAdapter, KeyringTokenStorage, OAuth2Config};

use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Authenticate with Google Drive via OAuth2
    Login {
        /// Google OAuth client ID (overrides auth.client_id from config)
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Remove stored credentials
    Logout,
    /// Check authentication status
    Status,
}

impl AuthCommand {
    pub async fn execute(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        match self {
            AuthCommand::Login { client_id } => {
                self.execute_login(config_path, client_id.as_deref(), format)
                    .await
            }
            AuthCommand::Logout => self.execute_logout(config_path, format).await,
            AuthCommand::Status => self.execute_status(config_path, format).await,
        }
    }

    /// Execute the login flow:
    /// 1. Load config to get the OAuth client id and secret
    /// 2. Run OAuth2 PKCE via DriveAuthAdapter
    /// 3. Store tokens in keyring
    async fn execute_login(
        &self,
        config_path: &Path,
        cli_client_id: Option<&str>,
        format: OutputFormat,
    ) -> Result<()> {
        let config = Config::load_or_default(config_path);

        let client_id = cli_client_id
            .map(|s| s.to_string())
            .or(config.auth.client_id.clone())
            .context(
                "No client_id provided. Use --client-id or set auth.client_id in config.yaml",
            )?;

        info!(client_id = %client_id, "Starting OAuth2 login");

        let mut oauth_config = OAuth2Config::new(&client_id);
        if let Some(secret) = &config.auth.client_secret {
            oauth_config = oauth_config.with_client_secret(secret);
        }

        format.info("Opening browser for Google login...");
        let adapter = DriveAuthAdapter::new(oauth_config);
        let tokens = adapter.login().await.context("OAuth2 login failed")?;

        KeyringTokenStorage::store(&client_id, &tokens)
            .context("Failed to store tokens in keyring")?;

        format.success("Authenticated with Google Drive");
        format.info(&format!(
            "Access token valid until {}",
            tokens.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if tokens.refresh_token.is_some() {
            format.info("Refresh token stored; future syncs will not prompt");
        }

        Ok(())
    }

    /// Execute logout: clear tokens from the keyring.
    async fn execute_logout(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        let config = Config::load_or_default(config_path);

        let Some(client_id) = config.auth.client_id else {
            format.info("No client_id configured. Nothing to log out.");
            return Ok(());
        };

        info!(client_id = %client_id, "Logging out");

        KeyringTokenStorage::clear(&client_id).context("Failed to clear tokens from keyring")?;

        format.success("Logged out successfully");
        format.info("Credentials removed from keyring");

        Ok(())
    }

    /// Execute status check: report token presence and validity.
    async fn execute_status(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        let config = Config::load_or_default(config_path);

        let Some(client_id) = config.auth.client_id else {
            format.info("Authentication status: Not configured");
            format.info("Set auth.client_id and run 'vaultdrive auth login'");
            return Ok(());
        };

        let (authenticated, token_status, expires_at) =
            match KeyringTokenStorage::load(&client_id) {
                Ok(Some(tokens)) => {
                    let status = if tokens.is_expired() {
                        "Expired (will refresh on next sync)"
                    } else {
                        "Valid"
                    };
                    (true, status, Some(tokens.expires_at))
                }
                Ok(None) => (false, "Not found", None),
                Err(_) => (false, "Error reading keyring", None),
            };

        if format.is_json() {
            let json = serde_json::json!({
                "authenticated": authenticated,
                "client_id": client_id,
                "token_status": token_status,
                "expires_at": expires_at.map(|t| t.to_rfc3339()),
            });
            format.print_json(&json);
        } else if authenticated {
            format.success("Authenticated with Google Drive");
            format.info(&format!("Client ID:    {}", client_id));
            format.info(&format!("Token status: {}", token_status));
            if let Some(expires_at) = expires_at {
                format.info(&format!(
                    "Expires:      {}",
                    expires_at.format("%Y-%m-%d %H:%M:%S UTC")
                ));
            }
        } else {
            format.info(&format!("Authentication status: {}", token_status));
            format.info("Run 'vaultdrive auth login' to authenticate");
        }

        Ok(())
    }
}
