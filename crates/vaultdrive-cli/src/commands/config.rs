//! Config command - View and manage VaultDrive configuration
//!
//! Provides the `vaultdrive config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use vaultdrive_core::config::Config;

use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "sync.remote_root_id")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(config_path, format).await,
            ConfigCommand::Set { key, value } => {
                self.execute_set(config_path, key, value, format).await
            }
            ConfigCommand::Validate => self.execute_validate(config_path, format).await,
        }
    }

    /// Show current configuration
    async fn execute_show(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        let config = Config::load_or_default(config_path);

        info!(config_path = %config_path.display(), "Showing configuration");

        if format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            format.print_json(&json);
        } else {
            format.success(&format!("Configuration ({})", config_path.display()));
            format.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;

            for line in yaml.lines() {
                format.info(line);
            }
        }

        Ok(())
    }

    /// Set a configuration value using dot-notation
    async fn execute_set(
        &self,
        config_path: &Path,
        key: &str,
        value: &str,
        format: OutputFormat,
    ) -> Result<()> {
        let mut config = Config::load_or_default(config_path);

        info!(key = %key, value = %value, "Setting configuration value");

        match apply_config_value(&mut config, key, value) {
            Ok(()) => {
                // Ensure parent directory exists
                if let Some(parent) = config_path.parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create configuration directory")?;
                }

                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                std::fs::write(config_path, &yaml)
                    .context("Failed to write configuration file")?;

                if format.is_json() {
                    let json = serde_json::json!({
                        "success": true,
                        "key": key,
                        "value": value,
                        "config_path": config_path.display().to_string(),
                    });
                    format.print_json(&json);
                } else {
                    format.success(&format!("Set {} = {}", key, value));
                    format.info(&format!("Saved to {}", config_path.display()));
                }
            }
            Err(e) => {
                if format.is_json() {
                    let json = serde_json::json!({
                        "success": false,
                        "key": key,
                        "value": value,
                        "error": e.to_string(),
                    });
                    format.print_json(&json);
                } else {
                    format.error(&format!("Failed to set '{}': {}", key, e));
                    format.info("");
                    format.info("Supported keys:");
                    format.info("  sync.vault_root      - Local vault root directory");
                    format.info("  sync.remote_root_id  - Target Drive folder id");
                    format.info("  auth.client_id       - Google OAuth client ID");
                    format.info("  auth.client_secret   - Google OAuth client secret");
                    format.info("  logging.level        - trace|debug|info|warn|error");
                }
            }
        }

        Ok(())
    }

    /// Validate configuration file
    async fn execute_validate(&self, config_path: &Path, format: OutputFormat) -> Result<()> {
        let config = match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if !config_path.exists() {
                    if format.is_json() {
                        let json = serde_json::json!({
                            "valid": false,
                            "config_path": config_path.display().to_string(),
                            "errors": ["Configuration file not found. Using defaults."],
                        });
                        format.print_json(&json);
                    } else {
                        format.info(&format!(
                            "Configuration file not found at {}",
                            config_path.display()
                        ));
                        format.info("Run 'vaultdrive config set <key> <value>' to create one.");
                    }
                    return Ok(());
                }

                if format.is_json() {
                    let json = serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [format!("Failed to parse configuration: {}", e)],
                    });
                    format.print_json(&json);
                } else {
                    format.error(&format!("Failed to parse configuration: {}", e));
                    format.info(&format!("File: {}", config_path.display()));
                }
                return Ok(());
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = config.validate();

        if format.is_json() {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            let json = serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            });
            format.print_json(&json);
        } else if errors.is_empty() {
            format.success("Configuration is valid");
            format.info(&format!("File: {}", config_path.display()));
        } else {
            format.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            format.info(&format!("File: {}", config_path.display()));
            format.info("");
            for error in &errors {
                format.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        Ok(())
    }
}

/// Apply a dot-notation key/value pair to a Config struct
///
/// Supported keys:
/// - sync.vault_root, sync.remote_root_id
/// - auth.client_id, auth.client_secret
/// - logging.level
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "sync.vault_root" => {
            config.sync.vault_root = PathBuf::from(value);
        }
        "sync.remote_root_id" => {
            config.sync.remote_root_id = value.to_string();
        }
        "auth.client_id" => {
            config.auth.client_id = optional_string(value);
        }
        "auth.client_secret" => {
            config.auth.client_secret = optional_string(value);
        }
        "logging.level" => {
            config.logging.level = value.to_string();
        }
        _ => {
            anyhow::bail!("Unknown configuration key: '{}'", key);
        }
    }

    Ok(())
}

fn optional_string(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}
