//! Configuration management for the CLI
//!
//! Configuration merges, lowest precedence first: built-in defaults, an
//! optional YAML/JSON config file, environment variables. Command-line
//! flags override all of it at the call site.

use crate::error::{Error, Result};
use perfline_core::baseline::store::DEFAULT_BASELINES_DIR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory containing run log files
    pub logs_dir: PathBuf,

    /// Directory for persisted baselines
    pub baselines_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            baselines_dir: PathBuf::from(DEFAULT_BASELINES_DIR),
        }
    }
}

impl Config {
    /// Load configuration, optionally from an explicit file.
    ///
    /// Without an explicit path, looks for `perfline.yaml` in the working
    /// directory, then `<config dir>/perfline/config.yaml`.
    pub fn load_with_file(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_file() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.merge_with_env();
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s == "yaml" || s == "yml")
            .unwrap_or(true);

        if is_yaml {
            serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "YAML".to_string(),
            })
        } else {
            serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "JSON".to_string(),
            })
        }
    }

    fn default_file() -> Option<PathBuf> {
        let local = PathBuf::from("perfline.yaml");
        if local.exists() {
            return Some(local);
        }
        let global = dirs::config_dir()?.join("perfline").join("config.yaml");
        global.exists().then_some(global)
    }

    fn merge_with_env(&mut self) {
        if let Ok(dir) = std::env::var("PERFLINE_LOGS_DIR") {
            self.logs_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("PERFLINE_BASELINES_DIR") {
            self.baselines_dir = PathBuf::from(dir);
        }
    }
}
