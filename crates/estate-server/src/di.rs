//! Explicit dependency wiring.
//!
//! Builds the store, the cache and the entity services from configuration
//! and hands out the shared `Arc<dyn ...>` handles. There is no container
//! magic: each dependency is passed to its consumer's constructor.

use estate_config::{AppConfig, CacheBackend, CacheConfig, DatabaseConfig};
use estate_core::{EstateResult, HealthCheck};
use estate_repository::{
    create_pool, DatabasePool, HouseRepository, InMemoryHouseRepository, InMemoryUserRepository,
    MySqlHouseRepository, MySqlUserRepository, UserRepository,
};
use estate_rest::AppState;
use estate_service::{
    spawn_cleanup_task, CacheInterface, EntityCache, HouseService, HouseServiceImpl, MemoryCache,
    RedisCacheService, UserService, UserServiceImpl,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Repositories plus the pool behind them, if any.
struct Store {
    users: Arc<dyn UserRepository>,
    houses: Arc<dyn HouseRepository>,
    pool: Option<Arc<DatabasePool>>,
}

async fn build_store(config: &DatabaseConfig) -> EstateResult<Store> {
    if config.is_memory() {
        info!("Using in-memory store");
        return Ok(Store {
            users: Arc::new(InMemoryUserRepository::default()),
            houses: Arc::new(InMemoryHouseRepository::default()),
            pool: None,
        });
    }

    let pool = create_pool(config).await?;
    info!("Using MySQL store");
    Ok(Store {
        users: Arc::new(MySqlUserRepository::new(pool.clone())),
        houses: Arc::new(MySqlHouseRepository::new(pool.clone())),
        pool: Some(pool),
    })
}

/// The shared cache, its health check and the sweeper for the memory backend.
struct CacheLayer {
    cache: Arc<dyn CacheInterface>,
    health: Arc<dyn HealthCheck>,
    cleanup_task: Option<JoinHandle<()>>,
}

fn build_cache(config: &CacheConfig) -> EstateResult<CacheLayer> {
    if !config.enabled {
        info!("Entity cache disabled");
        let cache = Arc::new(RedisCacheService::disabled());
        return Ok(CacheLayer {
            cache: cache.clone(),
            health: cache,
            cleanup_task: None,
        });
    }

    match config.backend {
        CacheBackend::Redis => {
            let cache = Arc::new(RedisCacheService::from_config(config)?);
            Ok(CacheLayer {
                cache: cache.clone(),
                health: cache,
                cleanup_task: None,
            })
        }
        CacheBackend::Memory => {
            let cache = Arc::new(MemoryCache::new());
            let cleanup_task = spawn_cleanup_task(cache.clone(), config.cleanup_interval());
            Ok(CacheLayer {
                cache: cache.clone(),
                health: cache,
                cleanup_task: Some(cleanup_task),
            })
        }
    }
}

/// Every long-lived component of the running server.
pub struct AppContainer {
    pub user_service: Arc<dyn UserService>,
    pub house_service: Arc<dyn HouseService>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
    cache_backend: &'static str,
    db_pool: Option<Arc<DatabasePool>>,
    cleanup_task: Option<JoinHandle<()>>,
}

impl AppContainer {
    /// Connects the store, builds the cache and wires both into the services.
    pub async fn build(config: &AppConfig) -> EstateResult<Self> {
        let store = build_store(&config.database).await?;
        let cache = build_cache(&config.cache)?;
        let cache_backend = cache.cache.backend();

        let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(
            store.users,
            EntityCache::new(cache.cache.clone(), config.cache.ttl()),
        ));
        let house_service: Arc<dyn HouseService> = Arc::new(HouseServiceImpl::new(
            store.houses,
            EntityCache::new(cache.cache, config.cache.ttl()),
        ));

        let mut health_checks: Vec<Arc<dyn HealthCheck>> = Vec::new();
        if let Some(pool) = &store.pool {
            health_checks.push(pool.clone());
        }
        health_checks.push(cache.health);

        info!(
            cache_backend,
            ttl_secs = config.cache.ttl_secs,
            "Services wired"
        );

        Ok(Self {
            user_service,
            house_service,
            health_checks,
            cache_backend,
            db_pool: store.pool,
            cleanup_task: cache.cleanup_task,
        })
    }

    /// Name of the active cache backend.
    #[must_use]
    pub fn cache_backend(&self) -> &'static str {
        self.cache_backend
    }

    /// Builds the state shared by the HTTP handlers.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        self.health_checks.iter().cloned().fold(
            AppState::new(
                self.user_service.clone(),
                self.house_service.clone(),
                self.cache_backend,
            ),
            AppState::with_health_check,
        )
    }

    /// Stops background work and closes the pool.
    pub async fn shutdown(self) {
        if let Some(task) = self.cleanup_task {
            task.abort();
        }
        if let Some(pool) = self.db_pool {
            pool.close().await;
        }
        info!("Application components shut down");
    }
}

impl std::fmt::Debug for AppContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContainer")
            .field("cache_backend", &self.cache_backend)
            .field("health_checks", &self.health_checks.len())
            .field("db_pool", &self.db_pool)
            .finish_non_exhaustive()
    }
}
