//! Caching decorator for experiment sources
//!
//! Keeps the instrumented request path off the network: a fresh snapshot is
//! served lock-free, and at most one caller at a time refreshes a stale
//! checkpoint, bounded by a hard timeout.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use domain::Experiment;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use application::ExperimentSource;

#[derive(Clone)]
struct CacheEntry {
    experiments: Vec<Experiment>,
    fetched_at: Instant,
}

/// Time-based cache in front of another experiment source
///
/// A stale entry is refreshed under a mutex so concurrent invocations do not
/// stampede the backing source; the refresh itself is bounded by
/// `fetch_timeout`. When a refresh times out the previous (stale) set is
/// served if one exists, otherwise the checkpoint degrades to no experiments.
pub struct CachedExperimentSource {
    inner: Arc<dyn ExperimentSource>,
    ttl: Duration,
    fetch_timeout: Duration,
    cache: ArcSwap<HashMap<String, CacheEntry>>,
    refresh: Mutex<()>,
}

impl CachedExperimentSource {
    /// Wrap a source with a freshness window and a refresh bound
    #[must_use]
    pub fn new(inner: Arc<dyn ExperimentSource>, ttl: Duration, fetch_timeout: Duration) -> Self {
        Self {
            inner,
            ttl,
            fetch_timeout,
            cache: ArcSwap::default(),
            refresh: Mutex::new(()),
        }
    }

    fn fresh(&self, checkpoint: &str) -> Option<Vec<Experiment>> {
        let snapshot = self.cache.load();
        let entry = snapshot.get(checkpoint)?;
        (entry.fetched_at.elapsed() < self.ttl).then(|| entry.experiments.clone())
    }

    fn stale(&self, checkpoint: &str) -> Option<Vec<Experiment>> {
        self.cache
            .load()
            .get(checkpoint)
            .map(|entry| entry.experiments.clone())
    }

    fn store(&self, checkpoint: &str, experiments: Vec<Experiment>) {
        let entry = CacheEntry {
            experiments,
            fetched_at: Instant::now(),
        };
        self.cache.rcu(|current| {
            let mut next: HashMap<String, CacheEntry> = (**current).clone();
            next.insert(checkpoint.to_string(), entry.clone());
            next
        });
    }
}

#[async_trait]
impl ExperimentSource for CachedExperimentSource {
    async fn fetch(&self, checkpoint: &str) -> Vec<Experiment> {
        if let Some(experiments) = self.fresh(checkpoint) {
            return experiments;
        }

        let _guard = self.refresh.lock().await;
        // another caller may have refreshed while we waited for the lock
        if let Some(experiments) = self.fresh(checkpoint) {
            return experiments;
        }

        match tokio::time::timeout(self.fetch_timeout, self.inner.fetch(checkpoint)).await {
            Ok(experiments) => {
                debug!(%checkpoint, count = experiments.len(), "experiment cache refreshed");
                self.store(checkpoint, experiments.clone());
                experiments
            }
            Err(_) => {
                warn!(
                    %checkpoint,
                    timeout_ms = self.fetch_timeout.as_millis(),
                    "experiment refresh timed out, serving last known set"
                );
                self.stale(checkpoint).unwrap_or_default()
            }
        }
    }
}

// Manual impl: the wrapped source is not Debug.
impl fmt::Debug for CachedExperimentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedExperimentSource")
            .field("ttl", &self.ttl)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish_non_exhaustive()
    }
}
