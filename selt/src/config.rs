//! Configuration for the selt CLI.
//!
//! Settings load from a `selt.toml` in the working directory, falling
//! back to the user configuration directory, then to defaults.

use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeltError};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "selt.toml";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// The namespace used for `::keyword` auto-namespacing and
    /// syntax-quote symbol resolution.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Printing options for the read command.
    #[serde(default)]
    pub print: PrintConfig,
}

/// Printing options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrintConfig {
    /// Print one form per line (otherwise all forms on one line).
    #[serde(default = "default_true")]
    pub one_per_line: bool,
}

fn default_namespace() -> String {
    "user".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            print: PrintConfig::default(),
        }
    }
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self { one_per_line: true }
    }
}

impl Config {
    /// Loads configuration from the default locations, or the defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SeltError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SeltError::Config(format!("Failed to parse configuration: {}", e)))?;
        Ok(config)
    }

    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        let global = config_dir()?.join("selt").join(CONFIG_FILE_NAME);
        if global.exists() {
            return Some(global);
        }
        None
    }
}
