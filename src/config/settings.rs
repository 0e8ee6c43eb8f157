//! User settings for wallet-cli
//!
//! Manages user preferences: audit logging, screen clearing in the
//! interactive shell, and an optional ledger file location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::WalletPaths;
use crate::error::WalletError;

/// User settings for wallet-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether adds and edits are written to the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Whether the interactive shell clears the screen between screens
    #[serde(default = "default_true")]
    pub clear_screen: bool,

    /// Ledger file to use instead of the one in the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit_enabled: true,
            clear_screen: true,
            data_file: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &WalletPaths) -> Result<Self, WalletError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Nothing is written until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| WalletError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| WalletError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WalletPaths) -> Result<(), WalletError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| WalletError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| WalletError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Ledger file to open: an explicit override wins, then the configured
    /// file, then the default location
    pub fn resolve_data_file(&self, paths: &WalletPaths, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| paths.data_file())
    }
}
