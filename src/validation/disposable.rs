use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::debug;

use crate::cache::loader::{CacheStatus, DomainCache};
use crate::cache::source::{DomainSource, EmbeddedDomainSource};
use crate::config::Config;
use crate::error::{DetectionError, InvalidEmailError, LoadError};
use crate::models::detection::DetectionResult;
use crate::validation::syntax::extract_domain;

/// Checks email addresses against the cached disposable domain list.
///
/// Cloning is cheap; clones share the same [`DomainCache`].
///
/// # Example
/// ```no_run
/// # async fn example() {
/// use nodisposable::validation::disposable::EmailDetector;
///
/// let detector = EmailDetector::bundled();
/// let result = detector.detect("someone@mailinator.com").await;
/// assert!(result.is_disposable);
/// assert_eq!(result.domain, "mailinator.com");
/// # }
/// ```
#[derive(Clone)]
pub struct EmailDetector {
    cache: Arc<DomainCache>,
}

impl EmailDetector {
    pub fn new(cache: Arc<DomainCache>) -> Self {
        Self { cache }
    }

    pub fn with_source(source: impl DomainSource + 'static) -> Self {
        Self::new(Arc::new(DomainCache::new(source)))
    }

    /// Detector backed by the domain list compiled into the crate.
    pub fn bundled() -> Self {
        Self::with_source(EmbeddedDomainSource::default())
    }

    /// Detector reading `<root>/data/<domains_file>` from disk.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(DomainCache::from_config(config)))
    }

    pub fn cache(&self) -> &Arc<DomainCache> {
        &self.cache
    }

    /// Classifies `email`. Never fails: validation and load errors are
    /// reported through [`DetectionResult::error`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn detect(&self, email: &str) -> DetectionResult {
        match self.classify(email).await {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "detection failed");
                DetectionResult::failed(e)
            }
        }
    }

    /// Classifies an untyped value, e.g. a field from a JSON payload.
    /// Anything other than a string is rejected as an empty email.
    pub async fn detect_value(&self, email: &Value) -> DetectionResult {
        match email.as_str() {
            Some(email) => self.detect(email).await,
            None => DetectionResult::failed(InvalidEmailError::Empty),
        }
    }

    /// `true` only for a successful classification as disposable.
    pub async fn is_disposable_email(&self, email: &str) -> bool {
        self.detect(email).await.is_disposable
    }

    /// Classifies every address concurrently, preserving input order.
    pub async fn detect_many<I, S>(&self, emails: I) -> Vec<DetectionResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails: Vec<S> = emails.into_iter().collect();
        join_all(emails.iter().map(|email| self.detect(email.as_ref()))).await
    }

    /// Loads the domain list ahead of the first detection.
    pub async fn preload(&self) -> Result<usize, LoadError> {
        self.cache.preload().await
    }

    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
    }

    pub fn peek_cached_domains(&self) -> Option<Vec<String>> {
        self.cache.peek()
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status()
    }

    async fn classify(&self, email: &str) -> Result<DetectionResult, DetectionError> {
        let domain = extract_domain(email)?;
        let domains = self.cache.ensure_loaded().await?;
        let is_disposable = domains.contains(&domain);
        Ok(DetectionResult::classified(domain, is_disposable))
    }
}
