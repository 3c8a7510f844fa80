//! Application configuration.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourceConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcesConfig {
    pub cbr: Option<SourceConfig>,
    pub exchangerate_api: Option<SourceConfig>,
    pub frankfurter: Option<SourceConfig>,
    pub coingecko: Option<SourceConfig>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            cbr: Some(SourceConfig {
                base_url: "https://www.cbr-xml-daily.ru".to_string(),
            }),
            exchangerate_api: Some(SourceConfig {
                base_url: "https://api.exchangerate-api.com".to_string(),
            }),
            frankfurter: Some(SourceConfig {
                base_url: "https://api.frankfurter.app".to_string(),
            }),
            coingecko: Some(SourceConfig {
                base_url: "https://api.coingecko.com".to_string(),
            }),
        }
    }
}

fn default_source() -> String {
    "cbr".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Feed used when no `--source` is given.
    #[serde(default = "default_source")]
    pub default_source: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional JSON file overlaying the built-in currency names.
    pub names_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            sources: SourcesConfig::default(),
            default_source: default_source(),
            timeout_secs: default_timeout_secs(),
            names_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to the
    /// built-in defaults when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "valuta")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
