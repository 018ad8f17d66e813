//! Repository trait definitions.

use async_trait::async_trait;
use estate_core::{EstateResult, House, HouseId, User, UserId};

/// User repository trait.
///
/// Implementations enforce username uniqueness themselves; a conflicting
/// write fails with `EstateError::DuplicateKey`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> EstateResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> EstateResult<Option<User>>;

    /// Returns every user ordered by id.
    async fn find_all(&self) -> EstateResult<Vec<User>>;

    /// Checks if a user ID exists.
    async fn exists_by_id(&self, id: UserId) -> EstateResult<bool>;

    /// Checks if a username exists.
    async fn exists_by_username(&self, username: &str) -> EstateResult<bool>;

    /// Inserts a new user. The incoming id is ignored; the stored record
    /// carrying the assigned id is returned.
    async fn save(&self, user: &User) -> EstateResult<User>;

    /// Overwrites an existing user, leaving `create_time` untouched.
    async fn update(&self, user: &User) -> EstateResult<User>;

    /// Deletes a user by ID. Returns whether a row was removed.
    async fn delete(&self, id: UserId) -> EstateResult<bool>;
}

/// House repository trait.
#[async_trait]
pub trait HouseRepository: Send + Sync {
    async fn find_by_id(&self, id: HouseId) -> EstateResult<Option<House>>;

    /// Returns every house ordered by id.
    async fn find_all(&self) -> EstateResult<Vec<House>>;

    async fn exists_by_id(&self, id: HouseId) -> EstateResult<bool>;

    /// Inserts a new house and returns it with its assigned id.
    async fn save(&self, house: &House) -> EstateResult<House>;

    async fn update(&self, house: &House) -> EstateResult<House>;

    async fn delete(&self, id: HouseId) -> EstateResult<bool>;
}
