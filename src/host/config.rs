//! Configuration handling
//!
//! Configuration is read from `~/.config/codecs/config.toml` (or the
//! platform equivalent), or from an explicit path given with `--config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CommandKey;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A script that pipes text through an external program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Command name shown to the user
    pub name: String,

    /// Program to run; resolved on PATH and `search_paths`
    pub program: String,

    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,

    /// Author shown in listings
    #[serde(default = "default_filter_author")]
    pub author: String,
}

fn default_filter_author() -> String {
    "config".to_string()
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Commands hidden from the host, as `kind:name`
    pub disabled: Vec<CommandKey>,

    /// Extra directories searched when resolving dependencies
    pub search_paths: Vec<PathBuf>,

    /// Maximum number of decoders chained by smart decode
    pub smart_decode_depth: u32,

    /// Scripts backed by external programs
    pub filters: Vec<FilterConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            disabled: Vec::new(),
            search_paths: Vec::new(),
            smart_decode_depth: 1,
            filters: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Returns the global config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "codecs", "codecs").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.smart_decode_depth == 0 {
            return Err(ConfigError::Invalid("smart_decode_depth must be at least 1".to_string()).into());
        }

        for filter in &self.filters {
            if filter.name.trim().is_empty() || filter.program.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "filter needs a name and a program: {:?}",
                    filter
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Returns true if the command is hidden by configuration
    pub fn is_disabled(&self, key: &CommandKey) -> bool {
        self.disabled.contains(key)
    }
}
