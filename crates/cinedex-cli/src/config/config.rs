//! `AppConfig` struct and TOML loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `[omdb].api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under `~/.config` used when `--dir` is not given.
const CONFIG_DIR_NAME: &str = "cinedex";

/// Resolves where the OMDb settings are read from.
///
/// `{dir}/config.toml` when `--dir` is given, otherwise
/// `~/.config/cinedex/config.toml`.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and `HOME` is not set.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(d) => Ok(d.join(CONFIG_FILE_NAME)),
        None => {
            let home = std::env::var("HOME").context("HOME environment variable is not set")?;
            Ok(PathBuf::from(home)
                .join(".config")
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME))
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb connection settings.
    #[serde(default)]
    pub omdb: OmdbConfig,
}

/// OMDb connection settings.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OmdbConfig {
    /// API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Endpoint override (defaults to `https://www.omdbapi.com/`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Picks the API key: a non-blank `env_value` wins over the config file.
    #[must_use]
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .into_iter()
            .chain(self.omdb.api_key.clone())
            .find(|key| !key.trim().is_empty())
    }

    /// Parses `[omdb].base_url`, if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an absolute URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.omdb
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid [omdb].base_url: {raw}")))
            .transpose()
    }
}
