//! MySQL user repository implementation.

use super::inserted_id;
use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use estate_core::{EstateError, EstateResult, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

const SELECT_USER: &str = "SELECT id, username, password, nickname, create_time FROM users";

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    nickname: Option<String>,
    create_time: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            password: row.password,
            nickname: row.nickname,
            create_time: row.create_time,
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> EstateResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> EstateResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE username = ?"))
            .bind(username)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> EstateResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} ORDER BY id"))
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn exists_by_id(&self, id: UserId) -> EstateResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ? LIMIT 1")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn exists_by_username(&self, username: &str) -> EstateResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE username = ? LIMIT 1")
                .bind(username)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn save(&self, user: &User) -> EstateResult<User> {
        debug!("Saving new user: {}", user.username);

        let mut tx = self.pool.begin().await?;

        // A username collision trips uk_users_username and surfaces as DuplicateKey.
        let result = sqlx::query(
            "INSERT INTO users (username, password, nickname, create_time) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.nickname)
        .bind(user.create_time)
        .execute(&mut *tx)
        .await?;

        let id = inserted_id(result.last_insert_id())?;

        // MySQL has no RETURNING; read the row back inside the same transaction.
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(user_id = id, "User row inserted");
        Ok(row.into())
    }

    async fn update(&self, user: &User) -> EstateResult<User> {
        debug!("Updating user: {}", user.id);

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET username = ?, password = ?, nickname = ? WHERE id = ?")
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.nickname)
            .bind(user.id.into_inner())
            .execute(&mut *tx)
            .await?;

        // rows_affected is 0 for a no-op update, so existence is decided by the read-back.
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(user.id.into_inner())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| EstateError::not_found("User", user.id))?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, id: UserId) -> EstateResult<bool> {
        debug!("Deleting user: {}", id);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
