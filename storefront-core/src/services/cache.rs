//! Response cache - time-boxed memoization of catalog requests
//!
//! Entries are never evicted. A stale entry is simply ignored and replaced
//! by the next successful load for the same key. Failed loads are not
//! cached.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::result::Result;

/// Default freshness window
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Logical catalog request
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Product(u64),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Products => f.write_str("products"),
            CacheKey::Product(id) => write!(f, "product-{}", id),
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    captured_at: Instant,
}

/// In-memory cache with a fixed freshness window
#[derive(Debug)]
pub struct ResponseCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> ResponseCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Display,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key = %key, "cache lock poisoned, treating as miss: {}", e);
                return None;
            }
        };
        entries
            .get(key)
            .filter(|entry| entry.captured_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` for `key`, stamped with the current time
    pub fn insert(&self, key: K, value: V) {
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(
                    key,
                    CacheEntry {
                        value,
                        captured_at: Instant::now(),
                    },
                );
            }
            Err(e) => tracing::warn!(key = %key, "cache lock poisoned, not storing: {}", e),
        }
    }

    /// Return the fresh value for `key`, or run `loader` and remember its result
    ///
    /// Errors from `loader` are passed through untouched and nothing is stored.
    pub async fn fetch<F, Fut>(&self, key: K, loader: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(value) = self.get(&key) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(value);
        }

        tracing::debug!(key = %key, "cache miss");
        let value = loader().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Number of stored entries, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
