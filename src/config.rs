//! Configuration for sensorlog-rs
//!
//! One explicit [`AppConfig`] value is threaded through constructors
//! rather than read as ambient process state: the recorder gets its
//! data directory from here, the demo driver its sampling rate.
//!
//! The config persists as JSON in the platform-appropriate data
//! directory:
//!
//! - **Linux**: `~/.local/share/sensorlog-rs/config.json`
//! - **macOS**: `~/Library/Application Support/sensorlog-rs/config.json`
//! - **Windows**: `%APPDATA%\sensorlog-rs\config.json`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SensorLogError};

/// Application identifier for data directories
pub const APP_ID: &str = "sensorlog-rs";

/// Config filename inside the app data directory
pub const CONFIG_FILE: &str = "config.json";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory for log files and captured frames
    pub data_dir: PathBuf,

    /// Acquisition sampling rate in Hz
    pub sampling_rate_hz: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sampling_rate_hz: 1.0,
        }
    }
}

impl AppConfig {
    /// Load the persisted config, falling back to defaults on a
    /// missing or unparseable file
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the config to the app data directory
    pub fn save(&self) -> Result<()> {
        let dir = app_data_dir().ok_or_else(|| {
            SensorLogError::Config("Could not determine app data directory".to_string())
        })?;
        std::fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SensorLogError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }
}

/// The application data directory path, platform-dependent
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Path to the persisted config file
pub fn config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// Default directory for logs and frames, `./data` when the platform
/// data directory cannot be determined
pub fn default_data_dir() -> PathBuf {
    app_data_dir()
        .map(|p| p.join("data"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.sampling_rate_hz, 1.0);
        assert!(config.data_dir.ends_with("data"));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = AppConfig {
            data_dir: PathBuf::from("/tmp/sensor-data"),
            sampling_rate_hz: 2.5,
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.data_dir, config.data_dir);
        assert_eq!(restored.sampling_rate_hz, 2.5);
    }
}
