//! Caching infrastructure for the service layer.
//!
//! One fixed policy: entries live for a TTL set at insertion and are
//! explicitly invalidated by writes. Two backends share the
//! [`CacheInterface`] contract: Redis and an in-process map.

mod cache_interface;
pub mod cache_keys;
mod entity_cache;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_keys::CacheType;
pub use entity_cache::EntityCache;
pub use memory_cache::{spawn_cleanup_task, MemoryCache};
pub use redis_cache::{RedisCacheService, DEFAULT_TTL};
