use std::path::{Path, PathBuf};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::config::Config;
use crate::error::LoadError;

/// Domain list bundled with the crate.
pub static BUNDLED_DOMAINS: &[u8] = include_bytes!("../../data/domains.json");

/// Producer of the raw, serialized disposable domain list.
///
/// Sources only hand back bytes; decoding and shape validation happen in
/// the cache so every source is held to the same format.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DomainSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;

    /// Human-readable name used in log lines and parse errors.
    fn describe(&self) -> String;
}

/// Reads the domain list from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileDomainSource {
    path: PathBuf,
}

impl FileDomainSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves `<root>/data/<domains_file>` from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.domains_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DomainSource for FileDomainSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| LoadError::unreadable(&self.path, e))
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Serves a domain list compiled into the binary.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedDomainSource {
    bytes: &'static [u8],
}

impl EmbeddedDomainSource {
    pub fn new(bytes: &'static [u8]) -> Self {
        Self { bytes }
    }
}

impl Default for EmbeddedDomainSource {
    fn default() -> Self {
        Self::new(BUNDLED_DOMAINS)
    }
}

#[async_trait]
impl DomainSource for EmbeddedDomainSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.to_vec())
    }

    fn describe(&self) -> String {
        "bundled domains.json".to_string()
    }
}
