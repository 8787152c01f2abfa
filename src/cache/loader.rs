use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::cache::domain_set::{DisposableDomainSet, parse_domains};
use crate::cache::source::{DomainSource, FileDomainSource};
use crate::config::Config;
use crate::error::LoadError;

/// Outcome of one physical load, shared with every caller waiting on it.
pub type LoadOutcome = Result<Arc<DisposableDomainSet>, LoadError>;

/// Observable lifecycle of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    Empty,
    Loading,
    Ready,
}

/// Point-in-time view of the cache, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub state: LoadState,
    pub domain_count: Option<usize>,
    pub loaded_at: Option<DateTime<Utc>>,
    /// Physical loads started by this cache since construction.
    pub load_count: u64,
}

enum Slot {
    Empty,
    Loading {
        attempt: u64,
        tx: broadcast::Sender<LoadOutcome>,
        /// Set when the cache is invalidated while this attempt runs.
        invalidated: bool,
    },
    Ready {
        domains: Arc<DisposableDomainSet>,
        loaded_at: DateTime<Utc>,
    },
}

struct Inner {
    slot: Slot,
    load_count: u64,
}

enum Role {
    Leader {
        attempt: u64,
        tx: broadcast::Sender<LoadOutcome>,
    },
    Follower(broadcast::Receiver<LoadOutcome>),
}

/// # Disposable Domain Cache
///
/// Lazily loads the disposable domain list from a [`DomainSource`] and keeps
/// it in memory until invalidated.
///
/// ## Single-flight loading
/// The first caller to find the cache empty becomes the *leader* and performs
/// the only read of the source. Callers arriving while that read is in flight
/// subscribe to its outcome instead of reading again, so every waiter sees the
/// same set or the same error. A failed load leaves the cache empty for the
/// next caller to retry.
///
/// ## Invalidation during a load
/// The in-flight load still completes and its waiters receive its result, but
/// the result is discarded instead of populating the cache. Callers arriving
/// after the invalidation but before completion join that same load.
pub struct DomainCache {
    source: Arc<dyn DomainSource>,
    load_timeout: Option<Duration>,
    inner: Mutex<Inner>,
}

impl DomainCache {
    pub fn new(source: impl DomainSource + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn DomainSource>) -> Self {
        Self {
            source,
            load_timeout: None,
            inner: Mutex::new(Inner {
                slot: Slot::Empty,
                load_count: 0,
            }),
        }
    }

    /// File-backed cache using the configured path and timeout.
    pub fn from_config(config: &Config) -> Self {
        let mut cache = Self::new(FileDomainSource::from_config(config));
        cache.load_timeout = config.load_timeout;
        cache
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Returns the cached domain set, loading it first if necessary.
    pub async fn ensure_loaded(&self) -> LoadOutcome {
        loop {
            let role = {
                let mut guard = self.lock();
                let inner = &mut *guard;
                match inner.slot {
                    Slot::Ready { ref domains, .. } => return Ok(Arc::clone(domains)),
                    Slot::Loading { ref tx, .. } => Role::Follower(tx.subscribe()),
                    Slot::Empty => {
                        inner.load_count += 1;
                        let attempt = inner.load_count;
                        let (tx, _) = broadcast::channel(1);
                        inner.slot = Slot::Loading {
                            attempt,
                            tx: tx.clone(),
                            invalidated: false,
                        };
                        Role::Leader { attempt, tx }
                    }
                }
            };

            match role {
                Role::Leader { attempt, tx } => return self.lead(attempt, tx).await,
                Role::Follower(mut rx) => {
                    debug!("joining in-flight domain list load");
                    match rx.recv().await {
                        Ok(outcome) => return outcome,
                        // Leader was dropped before publishing; start over.
                        Err(broadcast::error::RecvError::Closed) => continue,
                        Err(broadcast::error::RecvError::Lagged(_)) => {
                            return Err(LoadError::Abandoned);
                        }
                    }
                }
            }
        }
    }

    /// Loads eagerly, returning the number of domains cached.
    pub async fn preload(&self) -> Result<usize, LoadError> {
        self.ensure_loaded().await.map(|domains| domains.len())
    }

    pub fn invalidate(&self) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        match inner.slot {
            Slot::Loading {
                ref mut invalidated,
                attempt,
                ..
            } => {
                debug!(attempt, "cache invalidated during load; result will be discarded");
                *invalidated = true;
            }
            _ => {
                debug!("domain cache invalidated");
                inner.slot = Slot::Empty;
            }
        }
    }

    /// Defensive copy of the cached domains, in source order.
    pub fn peek(&self) -> Option<Vec<String>> {
        match self.lock().slot {
            Slot::Ready { ref domains, .. } => Some(domains.to_vec()),
            _ => None,
        }
    }

    pub fn state(&self) -> LoadState {
        match self.lock().slot {
            Slot::Empty => LoadState::Empty,
            Slot::Loading { .. } => LoadState::Loading,
            Slot::Ready { .. } => LoadState::Ready,
        }
    }

    pub fn status(&self) -> CacheStatus {
        let guard = self.lock();
        let (state, domain_count, loaded_at) = match guard.slot {
            Slot::Empty => (LoadState::Empty, None, None),
            Slot::Loading { .. } => (LoadState::Loading, None, None),
            Slot::Ready {
                ref domains,
                loaded_at,
            } => (LoadState::Ready, Some(domains.len()), Some(loaded_at)),
        };
        CacheStatus {
            state,
            domain_count,
            loaded_at,
            load_count: guard.load_count,
        }
    }

    async fn lead(&self, attempt: u64, tx: broadcast::Sender<LoadOutcome>) -> LoadOutcome {
        let guard = LoadGuard {
            cache: self,
            attempt,
            armed: true,
        };
        debug!(attempt, source = %self.source.describe(), "loading domain list");

        let outcome = self.fetch_and_parse().await.map(Arc::new);
        guard.disarm();

        {
            let mut inner = self.lock();
            let (owned, invalidated) = match inner.slot {
                Slot::Loading {
                    attempt: current,
                    invalidated,
                    ..
                } => (current == attempt, invalidated),
                _ => (false, false),
            };

            match &outcome {
                Ok(domains) if owned && !invalidated => {
                    info!(
                        attempt,
                        domains = domains.len(),
                        source = %self.source.describe(),
                        "disposable domain list loaded"
                    );
                    inner.slot = Slot::Ready {
                        domains: Arc::clone(domains),
                        loaded_at: Utc::now(),
                    };
                }
                Ok(_) => {
                    warn!(attempt, "discarding domain list loaded across an invalidation");
                    if owned {
                        inner.slot = Slot::Empty;
                    }
                }
                Err(e) => {
                    warn!(attempt, error = %e, "failed to load disposable domain list");
                    if owned {
                        inner.slot = Slot::Empty;
                    }
                }
            }
        }

        // No receivers simply means nobody else was waiting.
        let _ = tx.send(outcome.clone());
        outcome
    }

    async fn fetch_and_parse(&self) -> Result<DisposableDomainSet, LoadError> {
        let fetch = self.source.fetch();
        let bytes = match self.load_timeout {
            Some(timeout) => tokio::time::timeout(timeout, fetch)
                .await
                .map_err(|_| LoadError::Timeout {
                    source_name: self.source.describe(),
                    timeout,
                })??,
            None => fetch.await?,
        };
        parse_domains(&bytes, &self.source.describe())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets a `Loading` slot to `Empty` if the leader is dropped mid-load, so
/// waiting followers can retry instead of hanging.
struct LoadGuard<'a> {
    cache: &'a DomainCache,
    attempt: u64,
    armed: bool,
}

impl LoadGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.cache.lock();
        if matches!(inner.slot, Slot::Loading { attempt, .. } if attempt == self.attempt) {
            warn!(attempt = self.attempt, "domain list load abandoned");
            inner.slot = Slot::Empty;
        }
    }
}
