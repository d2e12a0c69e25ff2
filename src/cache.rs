// Time-bounded cache for slowly changing lookups shared across scrapes.

use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Single-entry cache. The lock is held across the refresh, so at most one
/// fetch is in flight and waiters observe either the old or the new entry.
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Returns the cached value while fresh, otherwise runs `fetch` and stores its result.
    /// A failed fetch leaves the previous entry in place and returns the error.
    pub async fn get<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut entry = self.entry.lock().await;
        if let Some(cached) = entry.as_ref()
            && cached.is_fresh(self.ttl)
        {
            tracing::debug!("using cached value");
            return Ok(cached.value.clone());
        }
        tracing::debug!("refreshing cached value");
        let value = fetch().await?;
        *entry = Some(CacheEntry {
            value: value.clone(),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }

    /// Drops the current entry so the next `get` fetches.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
