//! Operator configuration.
//!
//! Read from `<data_dir>/config.toml` when present; every field has a
//! default, so a missing file or a partial one is fine. The environment can
//! override the API URL and command-line flags override everything (the
//! binary applies those last).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.toml";
pub const API_URL_ENV: &str = "CUSTODY_ADMIN_API_URL";
const APP_DIR: &str = "custody-admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Backend base URL.
    pub api_url: String,

    /// Where the session file lives. Not read from the file itself.
    #[serde(skip)]
    pub data_dir: PathBuf,

    /// Rows per dashboard page.
    pub page_limit: u32,

    pub request_timeout_secs: u64,

    /// Zero disables cached user reads.
    pub user_cache_ttl_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: crate::network::DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(APP_DIR),
            page_limit: 10,
            request_timeout_secs: crate::network::DEFAULT_TIMEOUT_SECS,
            user_cache_ttl_secs: 30,
        }
    }
}

impl AdminConfig {
    /// `<platform data dir>/custody-admin`.
    pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
        let dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        Ok(dir.join(APP_DIR))
    }

    /// Load from the platform data directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_data_dir()?)
    }

    /// Load `<dir>/config.toml`, falling back to defaults when it does not
    /// exist. The result's `data_dir` is `dir`. Not validated.
    pub fn load_from(dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        let path = dir.join(CONFIG_FILE);

        let mut config = if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_toml_str(&fs::read_to_string(&path)?)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.data_dir = dir;
        Ok(config)
    }

    /// Parse only. Call [`validate`](Self::validate) once env and flag
    /// overrides have been applied.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `CUSTODY_ADMIN_API_URL` when set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https://, got {}",
                self.api_url
            )));
        }
        if self.page_limit == 0 {
            return Err(ConfigError::Invalid("page_limit must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn session_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn user_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.user_cache_ttl_secs)
    }
}
