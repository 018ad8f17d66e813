//! Test doubles shared by the service tests.

use crate::cache::CacheInterface;
use async_trait::async_trait;
use estate_core::{EstateResult, House, HouseId, User, UserId};
use estate_repository::{
    HouseRepository, InMemoryHouseRepository, InMemoryUserRepository, UserRepository,
};
use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

mock! {
    pub Cache {}

    #[async_trait]
    impl CacheInterface for Cache {
        async fn get_raw(&self, key: &str) -> EstateResult<Option<String>>;
        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> EstateResult<()>;
        async fn delete(&self, key: &str) -> EstateResult<bool>;
        async fn delete_prefix(&self, prefix: &str) -> EstateResult<u64>;
        fn is_enabled(&self) -> bool;
        fn backend(&self) -> &'static str;
    }
}

/// In-memory user store that counts the reads the cache should absorb.
#[derive(Default)]
pub struct CountingUserRepository {
    inner: InMemoryUserRepository,
    find_by_id_calls: AtomicUsize,
    find_all_calls: AtomicUsize,
}

impl CountingUserRepository {
    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for CountingUserRepository {
    async fn find_by_id(&self, id: UserId) -> EstateResult<Option<User>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> EstateResult<Option<User>> {
        self.inner.find_by_username(username).await
    }

    async fn find_all(&self) -> EstateResult<Vec<User>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }

    async fn exists_by_id(&self, id: UserId) -> EstateResult<bool> {
        self.inner.exists_by_id(id).await
    }

    async fn exists_by_username(&self, username: &str) -> EstateResult<bool> {
        self.inner.exists_by_username(username).await
    }

    async fn save(&self, user: &User) -> EstateResult<User> {
        self.inner.save(user).await
    }

    async fn update(&self, user: &User) -> EstateResult<User> {
        self.inner.update(user).await
    }

    async fn delete(&self, id: UserId) -> EstateResult<bool> {
        self.inner.delete(id).await
    }
}

/// In-memory house store that counts reads.
#[derive(Default)]
pub struct CountingHouseRepository {
    inner: InMemoryHouseRepository,
    find_by_id_calls: AtomicUsize,
    find_all_calls: AtomicUsize,
}

impl CountingHouseRepository {
    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HouseRepository for CountingHouseRepository {
    async fn find_by_id(&self, id: HouseId) -> EstateResult<Option<House>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> EstateResult<Vec<House>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }

    async fn exists_by_id(&self, id: HouseId) -> EstateResult<bool> {
        self.inner.exists_by_id(id).await
    }

    async fn save(&self, house: &House) -> EstateResult<House> {
        self.inner.save(house).await
    }

    async fn update(&self, house: &House) -> EstateResult<House> {
        self.inner.update(house).await
    }

    async fn delete(&self, id: HouseId) -> EstateResult<bool> {
        self.inner.delete(id).await
    }
}
