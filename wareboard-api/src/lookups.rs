//! Cached dropdown lookups.
//!
//! Warehouses, locations, and customers back the filter form dropdowns; the
//! lists are small and change rarely, so results are memoized through a
//! [`CacheProvider`] with a 5-minute TTL instead of re-fetching on every
//! form open.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::WarehouseClient;
use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::CachedValue;
use crate::cache::cache_key;
use crate::envelope;
use crate::error::Error;
use crate::model::ColumnSetting;
use crate::model::Customer;
use crate::model::Location;
use crate::model::Warehouse;
use crate::response::Response;

/// Fetches through a cache: returns the cached value when fresh, otherwise
/// runs `fetch` exactly once and stores the result under `key` for `ttl`.
///
/// A zero TTL bypasses both the read and the write.
pub async fn cached_fetch<T, F, Fut>(
    cache: &dyn CacheProvider,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<Response<T>, Error>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    if !ttl.is_zero()
        && let Some(cached) = cache.get(key).await
        && let Ok(data) = bincode::deserialize(&cached.data)
    {
        return Ok(Response::cache_hit(
            data,
            cached.created_at,
            cached.expires_at,
        ));
    }

    let data = fetch().await?;

    if ttl.is_zero() {
        return Ok(Response::new(data));
    }

    match bincode::serialize(&data) {
        Ok(bytes) => {
            let value = CachedValue::with_ttl(bytes, ttl);
            let (created_at, expires_at) = (value.created_at, value.expires_at);
            cache.set(key, value).await;
            Ok(Response::cache_miss(data, created_at, expires_at))
        }
        // Not cacheable; still return the fresh data.
        Err(_) => Ok(Response::new(data)),
    }
}

/// Dropdown lookups memoized through a TTL cache.
///
/// `enabled = false` short-circuits both the cache read and the network
/// fetch; callers get an empty list, matching a dropdown that has not been
/// opened yet.
#[derive(Clone)]
pub struct CachedLookups {
    client: WarehouseClient,
    cache: Arc<dyn CacheProvider>,
    config: CacheConfig,
    enabled: bool,
}

impl CachedLookups {
    /// Creates a lookup service over the given client and cache.
    pub fn new(client: WarehouseClient, cache: Arc<dyn CacheProvider>, config: CacheConfig) -> Self {
        Self {
            client,
            cache,
            config,
            enabled: true,
        }
    }

    /// Enables or disables lookups entirely.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Lists all warehouses.
    pub async fn warehouses(&self) -> Result<Response<Vec<Warehouse>>, Error> {
        self.lookup("warehouse_dropdown", "/warehouses", "").await
    }

    /// Lists storage locations, optionally scoped to one warehouse.
    pub async fn locations(
        &self,
        warehouse_id: Option<&str>,
    ) -> Result<Response<Vec<Location>>, Error> {
        let query = match warehouse_id {
            Some(id) => format!("warehouse_id={}", urlencoding::encode(id)),
            None => String::new(),
        };
        self.lookup("inventory_location_dropdown", "/locations", &query)
            .await
    }

    /// Lists all customers.
    pub async fn customers(&self) -> Result<Response<Vec<Customer>>, Error> {
        self.lookup("customer_dropdown", "/customers", "").await
    }

    /// Fetches the column settings for a view, cached with the longer
    /// columns TTL.
    pub async fn column_settings(&self, view: &str) -> Result<Response<Vec<ColumnSetting>>, Error> {
        if !self.enabled {
            return Ok(Response::new(Vec::new()));
        }
        let key = cache_key("view_columns", view);
        let client = self.client.clone();
        let view = view.to_string();
        cached_fetch(
            self.cache.as_ref(),
            &key,
            self.config.columns_ttl,
            move || async move { client.column_settings(&view).await },
        )
        .await
    }

    async fn lookup<T>(
        &self,
        namespace: &str,
        path: &str,
        query: &str,
    ) -> Result<Response<Vec<T>>, Error>
    where
        T: Serialize + DeserializeOwned,
    {
        if !self.enabled {
            return Ok(Response::new(Vec::new()));
        }

        let key = cache_key(namespace, query);
        let client = self.client.clone();
        let path = path.to_string();
        let query = query.to_string();

        cached_fetch(
            self.cache.as_ref(),
            &key,
            self.config.lookup_ttl,
            move || async move {
                let value = client
                    .get_json(&path, if query.is_empty() { None } else { Some(&query) })
                    .await?;
                let page = envelope::extract_page::<T>(&value, 1, 1000);
                Ok(page.into_items())
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::cache::InMemoryCache;
    use crate::response::CacheStatus;

    async fn counted_fetch(
        cache: &dyn CacheProvider,
        key: &str,
        ttl: Duration,
        calls: &AtomicUsize,
    ) -> Response<Vec<String>> {
        cached_fetch(cache, key, ttl, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["a".to_string(), "b".to_string()])
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = InMemoryCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(300);

        let first = counted_fetch(&cache, "k", ttl, &calls).await;
        assert!(first.cache.is_miss());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = counted_fetch(&cache, "k", ttl, &calls).await;
        assert!(second.cache.is_hit());
        assert_eq!(second.into_inner(), vec!["a".to_string(), "b".to_string()]);
        // The hit did not re-fetch.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches_exactly_once() {
        let cache = InMemoryCache::new();
        let calls = AtomicUsize::new(0);

        // Seed an already-expired entry under the key.
        let stale = bincode::serialize(&vec!["stale".to_string()]).unwrap();
        cache.set("k", CachedValue::with_ttl(stale, Duration::ZERO)).await;

        let response = counted_fetch(&cache, "k", Duration::from_secs(300), &calls).await;
        assert!(response.cache.is_miss());
        assert_eq!(response.data(), &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The refreshed entry serves the next read.
        let response = counted_fetch(&cache, "k", Duration::from_secs(300), &calls).await;
        assert!(response.cache.is_hit());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_bypasses_cache() {
        let cache = InMemoryCache::new();
        let calls = AtomicUsize::new(0);

        let response = counted_fetch(&cache, "k", Duration::ZERO, &calls).await;
        assert!(matches!(response.cache, CacheStatus::None));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Nothing was written, so the next call fetches again.
        counted_fetch(&cache, "k", Duration::ZERO, &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.get("k").await.is_none());
    }
}
