//! Configuration loading.
//!
//! Settings come from an optional `config.json` in the platform config
//! directory (or the file named by `ARN_CONFIG`). Flags and environment
//! variables override what the file says.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Environment variable naming an explicit config file.
const CONFIG_ENV: &str = "ARN_CONFIG";

/// Get the config directory path, if the platform has one.
fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "arnkit", "arn").map(|dirs| dirs.config_dir().to_path_buf())
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => match config_dir() {
                Some(dir) => dir.join(CONFIG_FILE),
                None => return Ok(Self::default()),
            },
        };

        Self::load_from(&path)
    }

    /// Load config from a specific file, or return default if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }
}
