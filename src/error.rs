//! Error types for email validation, domain-list loading and configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Malformed email input.
///
/// Never escapes [`EmailDetector::detect`]; it is rendered into
/// [`DetectionResult::error`] instead.
///
/// [`EmailDetector::detect`]: crate::validation::disposable::EmailDetector::detect
/// [`DetectionResult::error`]: crate::models::detection::DetectionResult::error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEmailError {
    #[error("Email must be a non-empty string")]
    Empty,

    #[error("Email must contain exactly one @ symbol with content before and after")]
    MalformedAddress,

    #[error("Invalid domain format")]
    InvalidDomain,
}

/// Failure to produce the disposable domain list.
///
/// `Clone` so that a single load outcome can be handed to every caller
/// waiting on it; I/O errors are shared behind an `Arc` for that reason.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("Failed to read domain list '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("Invalid JSON format in '{file}'")]
    InvalidJson { file: String },

    #[error("Domains data must be an array")]
    NotAnArray,

    #[error("All domain entries must be strings")]
    NonStringEntry,

    #[error("Loading domain list from '{source_name}' timed out after {}ms", .timeout.as_millis())]
    Timeout {
        source_name: String,
        timeout: Duration,
    },

    /// The in-flight load ended without publishing a result.
    #[error("Domain list load was abandoned before completing")]
    Abandoned,
}

impl LoadError {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

/// Any failure on the way to classifying an address.
///
/// Converted into [`DetectionResult::error`] at the detector boundary.
///
/// [`DetectionResult::error`]: crate::models::detection::DetectionResult::error
#[derive(Debug, Clone, Error)]
pub enum DetectionError {
    #[error(transparent)]
    InvalidEmail(#[from] InvalidEmailError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Invalid environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
