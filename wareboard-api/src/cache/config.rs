//! Cache configuration

use std::time::Duration;

/// Configuration for cache TTL settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wareboard_api::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_lookup_ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for dropdown lookup results (warehouses, locations, customers).
    ///
    /// Default: 5 minutes
    pub lookup_ttl: Duration,

    /// TTL for column settings per view.
    ///
    /// Default: 1 hour
    pub columns_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lookup_ttl: Duration::from_secs(300),
            columns_ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookup TTL.
    pub fn with_lookup_ttl(mut self, ttl: Duration) -> Self {
        self.lookup_ttl = ttl;
        self
    }

    /// Sets the column settings TTL.
    pub fn with_columns_ttl(mut self, ttl: Duration) -> Self {
        self.columns_ttl = ttl;
        self
    }

    /// Creates a config with no caching (zero TTLs).
    pub fn no_cache() -> Self {
        Self {
            lookup_ttl: Duration::ZERO,
            columns_ttl: Duration::ZERO,
        }
    }
}
