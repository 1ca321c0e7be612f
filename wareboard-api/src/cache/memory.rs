//! In-memory cache implementation using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::CacheProvider;
use super::CachedValue;

/// An in-memory cache backed by a concurrent hash map.
///
/// This is the default cache implementation. Data is lost when the process
/// exits; use [`SqliteCache`](super::SqliteCache) to persist across runs.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    store: DashMap<String, CachedValue>,
}

impl InMemoryCache {
    /// Creates a new empty in-memory cache.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    async fn get(&self, key: &str) -> Option<CachedValue> {
        let entry = self.store.get(key)?;
        let value = entry.value();

        if value.is_expired() {
            drop(entry);
            self.store.remove(key);
            None
        } else {
            Some(value.clone())
        }
    }

    async fn set(&self, key: &str, value: CachedValue) {
        self.store.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        self.store.remove(key);
    }

    async fn clear(&self) {
        self.store.clear();
    }

    async fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, value| {
            if value.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache
            .set("k", CachedValue::with_ttl(vec![1, 2], Duration::from_secs(60)))
            .await;
        let value = cache.get("k").await.unwrap();
        assert_eq!(value.data, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = InMemoryCache::new();
        cache
            .set("k", CachedValue::with_ttl(vec![1], Duration::ZERO))
            .await;
        assert!(cache.get("k").await.is_none());
        // Lazy removal happened on read.
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_gc_sweeps_expired() {
        let cache = InMemoryCache::new();
        cache
            .set("fresh", CachedValue::with_ttl(vec![1], Duration::from_secs(60)))
            .await;
        cache
            .set("stale", CachedValue::with_ttl(vec![2], Duration::ZERO))
            .await;
        assert_eq!(cache.gc().await, 1);
        assert_eq!(cache.len(), 1);
    }
}
