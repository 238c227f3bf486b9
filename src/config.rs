use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Application directory name under the platform config dir
pub const APP_DIR: &str = "BookingWizard";

fn default_transition_ms() -> u64 {
    300
}

fn default_tick_ms() -> u64 {
    50
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Duration of each half of a step transition (exit, then enter)
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// How often the driver polls transition deadlines
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Also write logs to a daily rotated file
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            tick_ms: default_tick_ms(),
            log_filter: default_log_filter(),
            log_to_file: default_log_to_file(),
        }
    }
}

impl WizardConfig {
    /// Load configuration from the platform-specific config directory.
    /// Falls back to defaults if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::LoadFailed {
                path: path.display().to_string(),
                source,
            }
        };

        let content = fs::read_to_string(path).map_err(|e| load_failed(Box::new(e)))?;
        let config: WizardConfig =
            serde_json::from_str(&content).map_err(|e| load_failed(Box::new(e)))?;
        config.validate()?;

        tracing::debug!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Reject values the driver cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be greater than 0".to_string()));
        }
        if self.transition_ms > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "transition_ms must be at most 10000 (got {})",
                self.transition_ms
            )));
        }
        Ok(())
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Directory for rotated log files
    pub fn log_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}
