use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

/// How long a cached lookup stays fresh, in seconds.
pub const DEFAULT_TTL_SECS: i64 = 10 * 60;

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

/// Key → value table with lazy expiry.
///
/// Staleness is only checked when a key is read; an expired entry is removed
/// by that read. There is no size bound and no background sweep, so keys that
/// are never read again stay in memory.
#[derive(Debug)]
pub struct CacheStore<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> CacheStore<V> {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    pub fn set(&self, key: String, value: V) {
        self.set_at(key, value, Utc::now());
    }

    /// Read `key` as of `now`, dropping the entry if it is no longer fresh.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let mut entries = self.entries.lock();

        let entry = entries.get(key)?;
        if now - entry.inserted_at < self.ttl {
            return Some(entry.value.clone());
        }

        entries.remove(key);
        tracing::debug!(key, "cache entry expired");
        None
    }

    pub fn set_at(&self, key: String, value: V, now: DateTime<Utc>) {
        self.entries.lock().insert(key, CacheEntry { value, inserted_at: now });
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
