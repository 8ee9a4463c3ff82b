//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/chatlore/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/chatlore/` (~/.config/chatlore/)
//! - State/Logs: `$XDG_STATE_HOME/chatlore/` (~/.local/state/chatlore/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Report configuration
    pub report: ReportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Report defaults
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Export file analyzed when the CLI is given no path
    pub default_input: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_input: default_input(),
        }
    }
}

fn default_input() -> String {
    "result.json".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no config file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Returns the config file path
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("chatlore/config.toml")
    }

    /// Returns the state directory used for logs
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("chatlore")
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("chatlore.log")
    }
}
