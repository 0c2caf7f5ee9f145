//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Environment variables
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Dump format to assume when none is forced (auto, text, json)
    #[serde(default = "default_format")]
    pub format: String,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Graphviz layout binary used to rasterize the graph document
    #[serde(default = "default_dot_binary")]
    pub dot_binary: String,

    /// Graph layout direction
    #[serde(default = "default_rankdir")]
    pub rankdir: String,

    /// Show all declared states instead of only reachable ones
    #[serde(default)]
    pub all_states: bool,

    /// Skip guard minimization and print representative labels only
    #[serde(default)]
    pub raw_labels: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

// Default value functions

fn default_format() -> String {
    "auto".to_string()
}

fn default_dot_binary() -> String {
    "dot".to_string()
}

fn default_rankdir() -> String {
    "LR".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dot_binary: default_dot_binary(),
            rankdir: default_rankdir(),
            all_states: false,
            raw_labels: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./dfa-viz.toml
    /// 2. ~/.dfa-viz/config.toml
    /// 3. /etc/dfa-viz/config.toml
    pub fn load() -> Result<Self> {
        let paths = vec![
            PathBuf::from("dfa-viz.toml"),
            dirs::home_dir()
                .map(|h| h.join(".dfa-viz").join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("/dev/null")),
            PathBuf::from("/etc/dfa-viz/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}
