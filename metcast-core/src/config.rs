use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::openweather::DEFAULT_BASE_URL;

/// The geocoding API never returns more than this many matches.
pub const MAX_GEOCODE_LIMIT: u8 = 5;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// geocode_limit = 3
/// language = "ga"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// OpenWeather `appid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override for the API host, mostly useful against a local mock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// How many candidates `locate` lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocode_limit: Option<u8>,

    /// Preferred language code for localized place names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Config {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Clamped to 1..=5; defaults to 1.
    pub fn geocode_limit(&self) -> u8 {
        self.geocode_limit.unwrap_or(1).clamp(1, MAX_GEOCODE_LIMIT)
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "metcast", "metcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url(), "https://api.openweathermap.org");
        assert_eq!(cfg.geocode_limit(), 1);
        assert_eq!(cfg.language(), None);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn set_api_key_trims_input() {
        let mut cfg = Config::default();
        cfg.set_api_key("  OPEN_KEY\n".into());
        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
    }

    #[test]
    fn geocode_limit_is_clamped() {
        let mut cfg = Config {
            geocode_limit: Some(0),
            ..Config::default()
        };
        assert_eq!(cfg.geocode_limit(), 1);

        cfg.geocode_limit = Some(40);
        assert_eq!(cfg.geocode_limit(), MAX_GEOCODE_LIMIT);
    }

    #[test]
    fn toml_round_trip_skips_unset_fields() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.language = Some("ga".into());

        let text = toml::to_string_pretty(&cfg).expect("serializes");
        assert!(!text.contains("base_url"));

        let parsed = Config::from_toml(&text).expect("parses");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("api_key = ").is_err());
    }
}
