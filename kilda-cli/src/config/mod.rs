//! Console configuration
//!
//! Loaded from `<config dir>/kilda-cli/config.toml` when present, then
//! overridden by `KILDA_*` environment variables (a `.env` file is honoured).

pub mod repository;
pub mod settings;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "kilda-cli";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base of the GUI REST API, e.g. `http://localhost:1010/openkilda/api`
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Path (relative to `base_url`) of the switch store configuration
    pub store_config_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1010/openkilda/api".to_string(),
            token: None,
            timeout_secs: 30,
            store_config_path: "store/switch-store-config".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a toast stays on screen
    pub toast_ttl_secs: u64,
    /// Redraw interval of the TUI loop
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ttl_secs: 5,
            tick_rate_ms: 50,
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = match config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = var("KILDA_URL") {
            self.api.base_url = url;
        }
        if let Some(token) = var("KILDA_TOKEN") {
            self.api.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(timeout) = var("KILDA_TIMEOUT_SECS") {
            self.api.timeout_secs = timeout
                .parse()
                .with_context(|| format!("KILDA_TIMEOUT_SECS is not a number: {}", timeout))?;
        }
        Ok(())
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Directory for the settings database and the log file
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("Could not determine a data directory for this platform")?
        .join(APP_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    Ok(dir)
}

pub fn settings_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("settings.db"))
}

pub fn log_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("kilda-cli.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.token.is_none());
        assert_eq!(config.api.store_config_path, "store/switch-store-config");
        assert_eq!(config.ui.toast_ttl_secs, 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://kilda.example.net/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://kilda.example.net/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.tick_rate_ms, 50);
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("KILDA_URL", "http://10.0.0.5:1010/openkilda/api"),
            ("KILDA_TOKEN", ""),
            ("KILDA_TIMEOUT_SECS", "7"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.api.token = Some("from-file".to_string());
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.5:1010/openkilda/api");
        assert_eq!(config.api.token, None);
        assert_eq!(config.api.timeout_secs, 7);
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "KILDA_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
