//! User service implementation.

use crate::cache::{cache_keys, CacheType, EntityCache};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use estate_core::{EstateError, EstateResult, User, UserId, ValidateExt};
use estate_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Cached user service.
///
/// Single users are cached by id and the full list under one collection
/// key. Username lookups always hit the store.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    cache: EntityCache,
}

impl UserServiceImpl {
    /// Creates a new user service.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>, cache: EntityCache) -> Self {
        Self {
            user_repository,
            cache,
        }
    }

    fn duplicate_username(username: &str) -> EstateError {
        EstateError::duplicate_key(format!("Username '{username}' already exists"))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: CreateUserRequest) -> EstateResult<UserResponse> {
        debug!("Creating user: {}", request.username);

        request.validate_request()?;

        if self.user_repository.exists_by_username(&request.username).await? {
            return Err(Self::duplicate_username(&request.username));
        }

        let user = User::new(request.username, request.password, request.nickname);
        let saved_user = self.user_repository.save(&user).await?;

        // The per-id entry is left cold; only the list is now stale.
        self.cache.evict_all(CacheType::UserList).await;

        info!("User created: {}", saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn get_user(&self, id: UserId) -> EstateResult<Option<UserResponse>> {
        debug!("Getting user: {}", id);

        let cache_key = cache_keys::user_by_id(id);
        if let Some(cached) = self.cache.lookup::<UserResponse>(&cache_key).await {
            debug!("Cache hit for user: {}", id);
            return Ok(Some(cached));
        }

        let Some(user) = self.user_repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let response = UserResponse::from(user);
        self.cache.store(&cache_key, &response).await;
        Ok(Some(response))
    }

    async fn get_user_by_username(&self, username: &str) -> EstateResult<Option<UserResponse>> {
        debug!("Getting user by username: {}", username);

        Ok(self
            .user_repository
            .find_by_username(username)
            .await?
            .map(UserResponse::from))
    }

    async fn list_users(&self) -> EstateResult<Vec<UserResponse>> {
        debug!("Listing users");

        let cache_key = cache_keys::user_list();
        if let Some(cached) = self.cache.lookup::<Vec<UserResponse>>(&cache_key).await {
            debug!("Cache hit for user list");
            return Ok(cached);
        }

        let users: Vec<UserResponse> = self
            .user_repository
            .find_all()
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();

        // An empty list is never cached so the next read sees new rows.
        if !users.is_empty() {
            self.cache.store(&cache_key, &users).await;
        }

        Ok(users)
    }

    async fn update_user(&self, request: UpdateUserRequest) -> EstateResult<UserResponse> {
        let id = request.id;
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EstateError::not_found("User", id))?;

        if let Some(holder) = self.user_repository.find_by_username(&request.username).await? {
            if holder.id != id {
                return Err(Self::duplicate_username(&request.username));
            }
        }

        user.overwrite(request.username, request.password, request.nickname);
        let updated_user = self.user_repository.update(&user).await?;
        let response = UserResponse::from(updated_user);

        self.cache
            .store(&cache_keys::user_by_id(id), &response)
            .await;
        self.cache.evict_all(CacheType::UserList).await;

        info!("User updated: {}", id);
        Ok(response)
    }

    async fn delete_user(&self, id: UserId) -> EstateResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(EstateError::not_found("User", id));
        }

        self.cache.evict(&cache_keys::user_by_id(id)).await;
        self.cache.evict_all(CacheType::UserList).await;

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheExt, CacheInterface, MemoryCache, DEFAULT_TTL};
    use crate::r#impl::test_support::{CountingUserRepository, MockCache};

    struct Fixture {
        service: UserServiceImpl,
        repo: Arc<CountingUserRepository>,
        cache: Arc<MemoryCache>,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(CountingUserRepository::default());
        let cache = Arc::new(MemoryCache::new());
        let service = UserServiceImpl::new(
            repo.clone(),
            EntityCache::new(cache.clone(), DEFAULT_TTL),
        );
        Fixture {
            service,
            repo,
            cache,
        }
    }

    fn create_request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: "secret".to_string(),
            nickname: Some("Nick".to_string()),
        }
    }

    fn update_request(id: UserId, username: &str, nickname: &str) -> UpdateUserRequest {
        UpdateUserRequest {
            id,
            username: username.to_string(),
            password: "changed".to_string(),
            nickname: Some(nickname.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let f = fixture();

        let created = f.service.create_user(create_request("alice")).await.unwrap();

        assert!(created.id.is_assigned());
        assert_eq!(created.username, "alice");
        assert_eq!(created.nickname.as_deref(), Some("Nick"));
        // Writes never warm the per-id entry.
        assert!(f.cache.is_empty());
    }

    #[tokio::test]
    async fn test_create_user_invalid_request() {
        let f = fixture();

        let err = f.service.create_user(create_request(" ")).await.unwrap_err();

        assert!(matches!(err, EstateError::Validation(_)));
        assert!(f.service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_user_miss_then_hit() {
        let f = fixture();
        let created = f.service.create_user(create_request("alice")).await.unwrap();

        let first = f.service.get_user(created.id).await.unwrap();
        let second = f.service.get_user(created.id).await.unwrap();

        assert_eq!(first, Some(created.clone()));
        assert_eq!(second, first);
        assert_eq!(f.repo.find_by_id_calls(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_none_and_not_cached() {
        let f = fixture();

        assert_eq!(f.service.get_user(UserId::new(99)).await.unwrap(), None);
        assert_eq!(f.service.get_user(UserId::new(99)).await.unwrap(), None);

        assert_eq!(f.repo.find_by_id_calls(), 2);
        assert!(f.cache.is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_is_not_cached() {
        let f = fixture();

        assert!(f.service.list_users().await.unwrap().is_empty());
        assert!(f.service.list_users().await.unwrap().is_empty());
        assert_eq!(f.repo.find_all_calls(), 2);

        f.service.create_user(create_request("alice")).await.unwrap();
        assert_eq!(f.service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_cached_until_next_write() {
        let f = fixture();
        let alice = f.service.create_user(create_request("alice")).await.unwrap();

        f.service.list_users().await.unwrap();
        f.service.list_users().await.unwrap();
        assert_eq!(f.repo.find_all_calls(), 1);

        let bob = f.service.create_user(create_request("bob")).await.unwrap();
        let listed = f.service.list_users().await.unwrap();
        assert_eq!(listed, vec![alice.clone(), bob]);
        assert_eq!(f.repo.find_all_calls(), 2);

        f.service
            .update_user(update_request(alice.id, "alice", "Al"))
            .await
            .unwrap();
        assert_eq!(f.service.list_users().await.unwrap()[0].nickname.as_deref(), Some("Al"));
        assert_eq!(f.repo.find_all_calls(), 3);

        f.service.delete_user(alice.id).await.unwrap();
        assert_eq!(f.service.list_users().await.unwrap().len(), 1);
        assert_eq!(f.repo.find_all_calls(), 4);
    }

    #[tokio::test]
    async fn test_update_refreshes_cached_user() {
        let f = fixture();
        let created = f.service.create_user(create_request("alice")).await.unwrap();
        f.service.get_user(created.id).await.unwrap();

        let updated = f
            .service
            .update_user(update_request(created.id, "alice2", "Al"))
            .await
            .unwrap();

        assert_eq!(updated.create_time, created.create_time);
        let cached: Option<UserResponse> = f
            .cache
            .get(&cache_keys::user_by_id(created.id))
            .await
            .unwrap();
        assert_eq!(cached, Some(updated.clone()));

        let calls_before = f.repo.find_by_id_calls();
        assert_eq!(f.service.get_user(created.id).await.unwrap(), Some(updated));
        assert_eq!(f.repo.find_by_id_calls(), calls_before);
    }

    #[tokio::test]
    async fn test_delete_clears_cached_user() {
        let f = fixture();
        let created = f.service.create_user(create_request("alice")).await.unwrap();
        f.service.get_user(created.id).await.unwrap();

        f.service.delete_user(created.id).await.unwrap();

        assert_eq!(
            f.cache.get_raw(&cache_keys::user_by_id(created.id)).await.unwrap(),
            None
        );
        assert_eq!(f.service.get_user(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_username_uniqueness() {
        let f = fixture();
        let alice = f.service.create_user(create_request("alice")).await.unwrap();
        let bob = f.service.create_user(create_request("bob")).await.unwrap();

        let err = f.service.create_user(create_request("alice")).await.unwrap_err();
        assert!(err.is_duplicate_key());

        let err = f
            .service
            .update_user(update_request(bob.id, "alice", "B"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_key());

        // Keeping your own username is not a collision.
        let same = f
            .service
            .update_user(update_request(alice.id, "alice", "A"))
            .await
            .unwrap();
        assert_eq!(same.username, "alice");
    }

    #[tokio::test]
    async fn test_missing_user_writes_are_not_found() {
        let f = fixture();

        let err = f.service.delete_user(UserId::new(5)).await.unwrap_err();
        assert!(err.is_not_found());

        let err = f
            .service
            .update_user(update_request(UserId::new(5), "ghost", "G"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_cached_list() {
        let f = fixture();
        f.service.create_user(create_request("alice")).await.unwrap();
        f.service.list_users().await.unwrap();

        let err = f.service.delete_user(UserId::new(77)).await.unwrap_err();
        assert!(err.is_not_found());

        f.service.list_users().await.unwrap();
        assert_eq!(f.repo.find_all_calls(), 1);
    }

    #[tokio::test]
    async fn test_get_user_by_username_bypasses_cache() {
        let f = fixture();
        f.service.create_user(create_request("alice")).await.unwrap();

        let found = f.service.get_user_by_username("alice").await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("alice".to_string()));
        assert_eq!(f.service.get_user_by_username("nobody").await.unwrap(), None);
        assert!(f.cache.is_empty());
    }

    #[tokio::test]
    async fn test_cache_failures_do_not_fail_requests() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Err(EstateError::Cache("connection refused".into())));
        cache
            .expect_set_raw()
            .returning(|_, _, _| Err(EstateError::Cache("connection refused".into())));
        cache
            .expect_delete()
            .returning(|_| Err(EstateError::Cache("connection refused".into())));
        cache
            .expect_delete_prefix()
            .returning(|_| Err(EstateError::Cache("connection refused".into())));
        cache.expect_backend().return_const("mock");

        let repo = Arc::new(CountingUserRepository::default());
        let cache: Arc<dyn CacheInterface> = Arc::new(cache);
        let service = UserServiceImpl::new(repo.clone(), EntityCache::new(cache, DEFAULT_TTL));

        let created = service.create_user(create_request("alice")).await.unwrap();
        assert!(service.get_user(created.id).await.unwrap().is_some());
        assert_eq!(service.list_users().await.unwrap().len(), 1);
        service
            .update_user(update_request(created.id, "alice", "A"))
            .await
            .unwrap();
        service.delete_user(created.id).await.unwrap();

        assert_eq!(repo.find_by_id_calls(), 2);
    }
}
