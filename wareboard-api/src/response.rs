//! Response wrapper with cache status

use chrono::DateTime;
use chrono::Utc;

/// A response from the warehouse client that includes cache status.
///
/// Cached lookups (warehouses, locations, customers) return this wrapper so
/// callers can tell whether the data came from cache or was freshly fetched.
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    /// Information about whether this response came from cache.
    pub cache: CacheStatus,
}

impl<T> Response<T> {
    /// Creates a new response with no cache involvement.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cache: CacheStatus::None,
        }
    }

    /// Creates a new response indicating a cache miss (fresh fetch, now cached).
    pub fn cache_miss(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            cache: CacheStatus::Miss {
                cached_at,
                expires_at,
            },
        }
    }

    /// Creates a new response indicating a cache hit.
    pub fn cache_hit(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            cache: CacheStatus::Hit {
                cached_at,
                expires_at,
            },
        }
    }

    /// Returns `true` if this response came from the cache.
    pub fn is_cached(&self) -> bool {
        matches!(self.cache, CacheStatus::Hit { .. })
    }

    /// Returns a reference to the inner data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the response and returns the inner data.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Cache status for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Cache was disabled or bypassed for this request.
    None,
    /// Cache miss. Data was freshly fetched and is now cached.
    Miss {
        /// When the data was cached.
        cached_at: DateTime<Utc>,
        /// When the cached data will expire.
        expires_at: DateTime<Utc>,
    },
    /// Cache hit. Data was returned from cache.
    Hit {
        /// When the data was originally cached.
        cached_at: DateTime<Utc>,
        /// When the cached data will expire.
        expires_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    /// Returns `true` if this is a cache hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Returns `true` if this is a cache miss.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }
}
