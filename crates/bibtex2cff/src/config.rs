//! Configuration file for bibtex2cff
//!
//! A TOML file with two optional tables:
//!
//! ```toml
//! [defaults]
//! license = "MIT"
//!
//! [overrides]
//! repository = "https://github.com/example/project"
//! keywords = ["bibtex", "citation"]
//! ```
//!
//! `[defaults]` replaces the built-in defaults; `[overrides]` is applied
//! below command-line overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::layers::{Defaults, Overrides};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "bibtex2cff.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub defaults: Defaults,
    pub overrides: Overrides,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Find and load the configuration.
    ///
    /// An explicit path must exist. Otherwise `./bibtex2cff.toml` is tried,
    /// then `<config dir>/bibtex2cff/config.toml`; with neither present the
    /// empty configuration is returned.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match candidate_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::load(&path),
            None => {
                debug!("no config file found");
                Ok(Self::default())
            }
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("bibtex2cff").join("config.toml"));
    }
    paths
}
