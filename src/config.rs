use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const ROOT_VAR: &str = "NODISPOSABLE_ROOT";
pub const DOMAINS_FILE_VAR: &str = "NODISPOSABLE_DOMAINS_FILE";
pub const LOAD_TIMEOUT_VAR: &str = "NODISPOSABLE_LOAD_TIMEOUT_MS";

pub const DEFAULT_DOMAINS_FILE: &str = "domains.json";
const DATA_DIR: &str = "data";

/// # Detector Configuration
///
/// Locates the bundled domain list and bounds how long a load may take.
///
/// ## Environment
/// - `NODISPOSABLE_ROOT`: install/deployment root (default: current directory)
/// - `NODISPOSABLE_DOMAINS_FILE`: file name under `<root>/data/` (default `domains.json`)
/// - `NODISPOSABLE_LOAD_TIMEOUT_MS`: optional timeout for one load, in milliseconds
///
/// Values from a `.env` file are honoured by [`Config::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub domains_file: String,
    pub load_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            domains_file: DEFAULT_DOMAINS_FILE.to_string(),
            load_timeout: None,
        }
    }
}

impl Config {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Reads the configuration from the process environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(root) = lookup(ROOT_VAR).filter(|v| !v.trim().is_empty()) {
            config.root = PathBuf::from(root.trim());
        }

        if let Some(file) = lookup(DOMAINS_FILE_VAR).filter(|v| !v.trim().is_empty()) {
            config.domains_file = file.trim().to_string();
        }

        if let Some(raw) = lookup(LOAD_TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: LOAD_TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            if millis == 0 {
                return Err(ConfigError::InvalidValue {
                    key: LOAD_TIMEOUT_VAR,
                    value: raw,
                    reason: "timeout must be greater than zero".to_string(),
                });
            }
            config.load_timeout = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }

    /// `<root>/data/<domains_file>`
    pub fn domains_path(&self) -> PathBuf {
        Path::new(&self.root).join(DATA_DIR).join(&self.domains_file)
    }
}
