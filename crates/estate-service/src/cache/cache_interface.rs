//! Cache interface trait for abstracted caching operations.

use super::CacheType;
use async_trait::async_trait;
use estate_core::EstateResult;
use std::time::Duration;

/// Cache interface for storing and retrieving cached data.
///
/// Values are JSON strings so the trait stays dyn-compatible; the typed
/// helpers live on [`CacheExt`]. Every operation is atomic on its own and
/// there is no locking across operations.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> EstateResult<Option<String>>;

    /// Set a raw JSON value, replacing any previous entry and starting a
    /// fresh TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> EstateResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> EstateResult<bool>;

    /// Delete every key starting with `prefix`.
    ///
    /// Returns the number of keys deleted.
    async fn delete_prefix(&self, prefix: &str) -> EstateResult<u64>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;

    /// Short backend name for logs and readiness output.
    fn backend(&self) -> &'static str;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> EstateResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn put<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> EstateResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Remove a single entry. Absent keys are a no-op.
    async fn evict(&self, key: &str) -> EstateResult<bool> {
        self.delete(key).await
    }

    /// Remove every entry of one cache type.
    async fn evict_all(&self, cache_type: CacheType) -> EstateResult<u64> {
        self.delete_prefix(&cache_type.prefix()).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
