pub mod launch_params;

pub use launch_params::LaunchParams;

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "miniapp.json";

// ============================================
// CONFIG STRUCTS
// ============================================

/// Session options read by [`Sdk::init`](crate::Sdk::init).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Refuse commands the negotiated version does not support.
    #[serde(default = "default_check_compat")]
    pub check_compat: bool,

    /// Log every sent command and received event at `info` instead of `debug`.
    #[serde(default)]
    pub debug: bool,

    /// Ask the host for theme and viewport right after initialization.
    #[serde(default = "default_request_initial_state")]
    pub request_initial_state: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            check_compat: default_check_compat(),
            debug: false,
            request_initial_state: default_request_initial_state(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_check_compat() -> bool {
    true
}
fn default_request_initial_state() -> bool {
    true
}

// ============================================
// IMPLEMENTATION
// ============================================

impl SdkConfig {
    /// Load config from {config_dir}/miniapp.json.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but cannot be read or parsed.
    #[track_caller]
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: SdkConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Parse config from an in-memory JSON document.
    #[track_caller]
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: Path::new("<inline>").to_path_buf(),
            reason: e.to_string(),
        })
    }
}
