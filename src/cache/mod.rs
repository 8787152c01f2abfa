/// # Disposable Domain Set
///
/// Immutable, lowercase set of disposable domains plus the decoder that
/// turns a serialized JSON array into one.
pub mod domain_set;

/// # Domain Cache Loader
///
/// Process-lifetime cache of the disposable domain list with single-flight
/// loading: concurrent callers that find the cache empty share one read of
/// the underlying [`source::DomainSource`].
///
/// ## Example
/// ```no_run
/// # async fn example() -> Result<(), nodisposable::error::LoadError> {
/// use nodisposable::cache::loader::DomainCache;
/// use nodisposable::cache::source::EmbeddedDomainSource;
///
/// let cache = DomainCache::new(EmbeddedDomainSource::default());
/// let domains = cache.ensure_loaded().await?;
/// assert!(domains.contains("mailinator.com"));
/// # Ok(())
/// # }
/// ```
pub mod loader;

/// Where the raw domain list comes from: a JSON file under the install
/// root, or the copy bundled into the binary.
pub mod source;


pub use domain_set::{DisposableDomainSet, parse_domains};
pub use loader::{CacheStatus, DomainCache, LoadState};
pub use source::{DomainSource, EmbeddedDomainSource, FileDomainSource};
