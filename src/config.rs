// src/config.rs
//! Playback configuration stored as JSON under the user's config directory

use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub tick_interval_ms: u64,
    pub show_raw_sentences: bool,
    /// Top of the SNR bar scale in dB-Hz
    pub snr_ceiling: u32,
    /// Width in columns of a full-scale SNR bar
    pub bar_width: usize,
    /// Read SNR values after cutting off GSV `*hh` checksums
    pub strip_checksums: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            show_raw_sentences: true,
            snr_ceiling: 60,
            bar_width: 30,
            strip_checksums: false,
        }
    }
}

impl ReplayConfig {
    /// Load configuration from `~/.config/nmea-replay/config.json`, or defaults if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ReplayError::Config(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ReplayError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to storage
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReplayError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| ReplayError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| ReplayError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("nmea-replay").join("config.json"))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Apply command line overrides
    pub fn update_playback(&mut self, interval_ms: Option<u64>, hide_raw: bool, strip_checksums: bool) {
        if let Some(ms) = interval_ms {
            self.tick_interval_ms = ms;
        }
        if hide_raw {
            self.show_raw_sentences = false;
        }
        if strip_checksums {
            self.strip_checksums = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReplayConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.show_raw_sentences);
        assert_eq!(config.snr_ceiling, 60);
        assert!(!config.strip_checksums);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ReplayConfig = serde_json::from_str(r#"{"tick_interval_ms": 250}"#).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.bar_width, 30);
    }

    #[test]
    fn test_update_playback() {
        let mut config = ReplayConfig::default();
        config.update_playback(Some(100), true, false);
        assert_eq!(config.tick_interval_ms, 100);
        assert!(!config.show_raw_sentences);
        assert!(!config.strip_checksums);

        config.update_playback(None, false, true);
        assert_eq!(config.tick_interval_ms, 100);
        assert!(!config.show_raw_sentences);
        assert!(config.strip_checksums);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir()
            .join(format!("nmea-replay-config-{}", std::process::id()))
            .join("config.json");
        let mut config = ReplayConfig::default();
        config.snr_ceiling = 55;

        config.save_to(&path).unwrap();
        assert_eq!(ReplayConfig::load_from(&path).unwrap(), config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let path = std::env::temp_dir().join(format!("nmea-replay-bad-{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(ReplayConfig::load_from(&path), Err(ReplayError::Config(_))));
        let _ = std::fs::remove_file(&path);
    }
}
