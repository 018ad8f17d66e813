//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use estate_core::{EstateResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user. Fails with `DuplicateKey` when the username is taken.
    async fn create_user(&self, request: CreateUserRequest) -> EstateResult<UserResponse>;

    /// Gets a user by ID; `None` when no such user exists.
    async fn get_user(&self, id: UserId) -> EstateResult<Option<UserResponse>>;

    /// Gets a user by username, bypassing the cache.
    async fn get_user_by_username(&self, username: &str) -> EstateResult<Option<UserResponse>>;

    /// Lists every user ordered by id.
    async fn list_users(&self) -> EstateResult<Vec<UserResponse>>;

    /// Overwrites an existing user, keeping its creation time.
    async fn update_user(&self, request: UpdateUserRequest) -> EstateResult<UserResponse>;

    /// Deletes a user. Fails with `NotFound` when no such user exists.
    async fn delete_user(&self, id: UserId) -> EstateResult<()>;
}
