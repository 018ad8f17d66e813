//! Failure-tolerant cache access for the entity services.
//!
//! The store is the source of truth, so a cache error never fails a request:
//! a broken read is treated as a miss and a broken write or invalidation is
//! logged. Staleness after a failed invalidation is bounded by the TTL.

use super::{CacheExt, CacheInterface, CacheType};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Shared cache handle plus the TTL applied to every entry.
#[derive(Clone)]
pub struct EntityCache {
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl EntityCache {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `key`, or `None` on a miss or a failed read.
    pub async fn lookup<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, falling back to store");
                None
            }
        }
    }

    /// Stores `value` under `key` with a fresh TTL.
    pub async fn store<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.put(key, value, self.ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    pub async fn evict(&self, key: &str) {
        if let Err(e) = self.cache.evict(key).await {
            warn!(key, error = %e, "Cache eviction failed, entry expires with its TTL");
        }
    }

    pub async fn evict_all(&self, cache_type: CacheType) {
        if let Err(e) = self.cache.evict_all(cache_type).await {
            warn!(
                cache_type = cache_type.as_str(),
                error = %e,
                "Cache eviction failed, entries expire with their TTL"
            );
        }
    }
}

impl std::fmt::Debug for EntityCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityCache")
            .field("backend", &self.cache.backend())
            .field("ttl", &self.ttl)
            .finish()
    }
}
