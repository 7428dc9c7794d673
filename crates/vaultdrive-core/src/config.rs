//! Configuration module for VaultDrive.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults. The vault root and the
//! remote target folder id live here rather than in code; notification
//! credentials come from the environment (see `vaultdrive-notify`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for VaultDrive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub sync: SyncConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Root directory of the local notes vault.
    pub vault_root: PathBuf,
    /// Google Drive folder id designated as the sync destination's top level.
    pub remote_root_id: String,
}

/// Authentication / OAuth settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Google OAuth client ID. `None` until the user runs `vaultdrive auth login`.
    pub client_id: Option<String>,
    /// Google OAuth client secret for the installed-app flow.
    pub client_secret: Option<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/vaultdrive/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("vaultdrive")
            .join("config.yaml")
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            vault_root: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Vault"),
            remote_root_id: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.remote_root_id"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.sync.vault_root.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "sync.vault_root".into(),
                message: "must not be empty".into(),
            });
        }

        if self.sync.remote_root_id.is_empty() {
            errors.push(ValidationError {
                field: "sync.remote_root_id".into(),
                message: "must be set to the target Drive folder id".into(),
            });
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "must be one of {}, got {:?}",
                    VALID_LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config_has_info_level() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert!(config.auth.client_id.is_none());
    }

    #[test]
    fn test_default_config_fails_validation_without_root_id() {
        let config = Config::default();
        let errors = config.validate();
        assert!(errors
            .iter()
            .any(|e| e.field == "sync.remote_root_id"));
    }

    #[test]
    fn test_load_valid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sync:\n  vault_root: /home/user/Vault\n  remote_root_id: 1k2Fzvi0SnKk8G4k\nauth:\n  client_id: my-client.apps.googleusercontent.com\n  client_secret: shhh\nlogging:\n  level: debug"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sync.vault_root, PathBuf::from("/home/user/Vault"));
        assert_eq!(config.sync.remote_root_id, "1k2Fzvi0SnKk8G4k");
        assert_eq!(
            config.auth.client_id.as_deref(),
            Some("my-client.apps.googleusercontent.com")
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.yaml"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = Config::default();
        config.sync.remote_root_id = "root-id".into();
        config.logging.level = "loud".into();

        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "logging.level");
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.sync.remote_root_id = "abc123".into();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.sync.remote_root_id, "abc123");
    }
}
