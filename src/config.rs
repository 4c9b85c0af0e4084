//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend address
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout for backend calls
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Route opened when nothing else is requested
const DEFAULT_ROUTE: &str = "/alerts/channelconfiguration";

/// Environment variable overriding the backend address
pub const BACKEND_URL_ENV: &str = "ALERTS_BACKEND_URL";

/// Environment variable selecting the route to open on start
pub const ROUTE_ENV: &str = "ALERTS_ROUTE";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the alerts backend
    pub backend_url: Option<String>,
    /// Route to open on start, e.g. `/alerts/slack`
    pub initial_route: Option<String>,
    /// Timeout for a single backend request
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "chaosgenius", "alerts-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file, defaulting when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Backend address, preferring the environment over the file
    pub fn backend_url(&self) -> String {
        Self::resolve(BACKEND_URL_ENV, self.backend_url.as_deref(), DEFAULT_BACKEND_URL)
    }

    /// Route to open on start, preferring the environment over the file
    pub fn initial_route(&self) -> String {
        Self::resolve(ROUTE_ENV, self.initial_route.as_deref(), DEFAULT_ROUTE)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    fn resolve(env_key: &str, configured: Option<&str>, default: &str) -> String {
        std::env::var(env_key)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }
}
