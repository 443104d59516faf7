//! Client configuration.
//!
//! Loaded from `<config dir>/taskpilot/config.toml` when present, with the
//! base url overridable through `TASKPILOT_BASE_URL`. A missing or broken
//! file degrades to the defaults so the client always starts.

use crate::error::{Result, TaskpilotError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const BASE_URL_ENV: &str = "TASKPILOT_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base url of the backend, without a trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Interval between thread-history refreshes in seconds
    pub history_poll_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            history_poll_interval_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from the default path, falling back to the
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(target: "config", "falling back to defaults: {e}");
                Self::default()
            }),
            _ => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Loads the configuration from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TaskpilotError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&raw)?)
    }

    /// `<config dir>/taskpilot/config.toml`, when a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskpilot").join("config.toml"))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.is_empty()
        {
            self.base_url = url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.history_poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_files_keep_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://tasks.example.com\"").unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.base_url, "https://tasks.example.com");
        assert_eq!(config.history_poll_interval_secs, 30);
    }

    #[test]
    fn broken_files_surface_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [not toml").unwrap();

        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, TaskpilotError::Config(_)));
    }
}
