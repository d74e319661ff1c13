use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    client::Client,
    params::{Lang, Units},
    query::DEFAULT_BASE_URL,
    transport::ReqwestTransport,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_units = "metric"
/// default_lang = "en"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,

    /// One of "standard", "metric" or "imperial".
    pub default_units: Option<String>,

    pub default_lang: Option<String>,

    /// Overrides the API host, e.g. for a local stub server.
    pub base_url: Option<String>,

    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "openweathermap", "owm")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Stored API key, with a hint on how to set one when missing.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: pass --app-id, set OWM_API_KEY, or run `owm configure`."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn units(&self) -> Result<Option<Units>> {
        self.default_units
            .as_deref()
            .map(Units::try_from)
            .transpose()
            .context("Invalid `default_units` in config")
    }

    pub fn set_units(&mut self, units: Units) {
        self.default_units = Some(units.as_str().to_string());
    }

    pub fn lang(&self) -> Option<Lang> {
        self.default_lang
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .map(Lang::new)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    /// Build a client, preferring `api_key_override` over the stored key.
    pub fn client(&self, api_key_override: Option<&str>) -> Result<Client> {
        let api_key = match api_key_override.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => key,
            None => self.api_key()?,
        };

        Client::with_transport(api_key, self.base_url(), ReqwestTransport::new())
            .with_context(|| format!("Failed to create client for {}", self.base_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: pass --app-id"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert!(cfg.api_key().is_err());
    }

    #[test]
    fn override_key_wins_over_stored_key() {
        let mut cfg = Config::default();
        assert!(cfg.client(None).is_err());

        assert!(cfg.client(Some("FLAG_KEY")).is_ok());

        cfg.set_api_key(" STORED ".into());
        assert_eq!(cfg.api_key().unwrap(), "STORED");
        assert!(cfg.client(None).is_ok());
    }

    #[test]
    fn units_and_lang_are_typed() {
        let mut cfg = Config::default();
        assert_eq!(cfg.units().unwrap(), None);
        assert_eq!(cfg.lang(), None);

        cfg.set_units(Units::Imperial);
        cfg.default_lang = Some("DE".into());
        assert_eq!(cfg.units().unwrap(), Some(Units::Imperial));
        assert_eq!(cfg.lang(), Some(Lang::new("de")));

        cfg.default_units = Some("furlongs".into());
        assert!(cfg.units().is_err());
    }

    #[test]
    fn base_url_and_timeout_defaults() {
        let mut cfg = Config::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout(), None);

        cfg.timeout_secs = Some(0);
        assert_eq!(cfg.timeout(), None);
        cfg.timeout_secs = Some(3);
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn invalid_base_url_fails_client_creation() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("not a url".into()),
            ..Config::default()
        };
        let err = cfg.client(None).unwrap_err();
        assert!(format!("{err:#}").contains("invalid base URL"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_units(Units::Metric);
        cfg.timeout_secs = Some(15);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
