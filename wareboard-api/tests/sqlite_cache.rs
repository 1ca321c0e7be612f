//! Integration tests for the SQLite-backed cache.
//!
//! Runs against an in-memory database, exercising the full
//! `CacheProvider` surface the way the lookup layer uses it.

use std::time::Duration;

use chrono::Utc;
use wareboard_api::cache::{CacheProvider, CachedValue, SqliteCache, cache_key};

fn expired_value(data: &[u8]) -> CachedValue {
    let created = Utc::now() - chrono::Duration::hours(2);
    let expired = Utc::now() - chrono::Duration::hours(1);
    CachedValue::new(data.to_vec(), created, expired)
}

#[tokio::test]
async fn test_set_get_round_trip() {
    let cache = SqliteCache::open_in_memory().await.unwrap();
    let key = cache_key("warehouses", "enabled=true");

    cache
        .set(&key, CachedValue::with_ttl(b"payload".to_vec(), Duration::from_secs(300)))
        .await;

    let value = cache.get(&key).await.expect("value should be cached");
    assert_eq!(value.data, b"payload");
    assert!(!value.is_expired());
}

#[tokio::test]
async fn test_expired_entry_is_not_returned() {
    let cache = SqliteCache::open_in_memory().await.unwrap();
    cache.set("stale", expired_value(b"old")).await;

    assert!(cache.get("stale").await.is_none());
}

#[tokio::test]
async fn test_remove_and_clear() {
    let cache = SqliteCache::open_in_memory().await.unwrap();
    cache
        .set("a", CachedValue::with_ttl(vec![1], Duration::from_secs(60)))
        .await;
    cache
        .set("b", CachedValue::with_ttl(vec![2], Duration::from_secs(60)))
        .await;

    cache.remove("a").await;
    assert!(cache.get("a").await.is_none());
    assert!(cache.get("b").await.is_some());

    cache.clear().await;
    assert!(cache.get("b").await.is_none());
    assert_eq!(cache.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_gc_sweeps_only_expired_entries() {
    let cache = SqliteCache::open_in_memory().await.unwrap();
    cache.set("stale", expired_value(b"old")).await;
    cache
        .set("fresh", CachedValue::with_ttl(vec![3], Duration::from_secs(300)))
        .await;
    assert_eq!(cache.len().await.unwrap(), 2);

    assert_eq!(cache.gc().await, 1);
    assert_eq!(cache.len().await.unwrap(), 1);
    assert!(cache.get("fresh").await.is_some());
}

#[tokio::test]
async fn test_overwrite_replaces_value() {
    let cache = SqliteCache::open_in_memory().await.unwrap();
    cache
        .set("k", CachedValue::with_ttl(b"first".to_vec(), Duration::from_secs(60)))
        .await;
    cache
        .set("k", CachedValue::with_ttl(b"second".to_vec(), Duration::from_secs(60)))
        .await;

    let value = cache.get("k").await.unwrap();
    assert_eq!(value.data, b"second");
    assert_eq!(cache.len().await.unwrap(), 1);
}
