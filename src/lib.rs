pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use cache::{CacheStatus, DomainCache, DomainSource, LoadState};
pub use config::Config;
pub use error::{DetectionError, InvalidEmailError, LoadError};
pub use models::DetectionResult;
pub use validation::disposable::EmailDetector;
