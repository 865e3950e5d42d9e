//! CLI configuration file.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use transfer::{FilterMode, Layout};

use crate::error::CliError;
use crate::paths;

/// Settings read from `config.json`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub filter_mode: FilterMode,
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            filter_mode: FilterMode::default(),
            layout: Layout::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `path` is None.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::read(path),
            None => match paths::config_file() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn level(&self) -> Result<LevelFilter, CliError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| CliError::LogLevel(self.log_level.clone()))
    }
}
