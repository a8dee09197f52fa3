use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nft_options_sdk::DiscoveryConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-editable settings, stored as `config.json` in the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub relays: Vec<String>,
    pub network_tag: String,
    pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from(&DiscoveryConfig::default())
    }
}

impl From<&DiscoveryConfig> for AppConfig {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            relays: config.relays.clone(),
            network_tag: config.network_tag.clone(),
            fetch_timeout_secs: config.fetch_timeout.as_secs(),
        }
    }
}

impl AppConfig {
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Read the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::path(data_dir);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring unreadable {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(data_dir)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(data_dir), json)?;
        Ok(())
    }

    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            relays: self.relays.clone(),
            network_tag: self.network_tag.clone(),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());
    }

    #[test]
    fn defaults_match_discovery_defaults() {
        assert_eq!(
            AppConfig::default().discovery_config(),
            DiscoveryConfig::default()
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            relays: vec!["ws://127.0.0.1:7777".to_string()],
            network_tag: "sepolia".to_string(),
            fetch_timeout_secs: 3,
        };
        config.save(dir.path()).unwrap();

        let loaded = AppConfig::load(dir.path());
        assert_eq!(loaded, config);
        assert_eq!(loaded.discovery_config().fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(AppConfig::path(dir.path()), r#"{ "networkTag": "sepolia" }"#).unwrap();

        let loaded = AppConfig::load(dir.path());
        assert_eq!(loaded.network_tag, "sepolia");
        assert_eq!(loaded.relays, AppConfig::default().relays);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(AppConfig::path(dir.path()), "{{{").unwrap();
        assert_eq!(AppConfig::load(dir.path()), AppConfig::default());
    }
}
