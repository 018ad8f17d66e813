//! In-process store.
//!
//! Selected with a `memory:` database URL. Rows live in a `BTreeMap` keyed by
//! id behind a `parking_lot::RwLock`, so `find_all` is naturally ordered and
//! the uniqueness check runs under the same write lock as the insert.

use crate::traits::{HouseRepository, UserRepository};
use async_trait::async_trait;
use estate_core::{Entity, EstateError, EstateResult, House, HouseId, User, UserId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

struct Table<E: Entity> {
    next_id: i64,
    rows: BTreeMap<E::Id, E>,
}

/// Lock-guarded table with auto-increment ids.
struct MemoryTable<E: Entity> {
    state: RwLock<Table<E>>,
}

impl<E> MemoryTable<E>
where
    E: Entity + Clone,
    E::Id: From<i64>,
{
    fn new() -> Self {
        Self {
            state: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    fn get(&self, id: E::Id) -> Option<E> {
        self.state.read().rows.get(&id).cloned()
    }

    fn contains(&self, id: E::Id) -> bool {
        self.state.read().rows.contains_key(&id)
    }

    fn all(&self) -> Vec<E> {
        self.state.read().rows.values().cloned().collect()
    }

    fn find(&self, predicate: impl Fn(&E) -> bool) -> Option<E> {
        self.state.read().rows.values().find(|e| predicate(e)).cloned()
    }

    /// Inserts under a fresh id once `check` accepts the current rows.
    fn insert(
        &self,
        entity: &E,
        check: impl FnOnce(&BTreeMap<E::Id, E>) -> EstateResult<()>,
    ) -> EstateResult<E> {
        let mut state = self.state.write();
        check(&state.rows)?;

        let id = E::Id::from(state.next_id);
        state.next_id += 1;

        let mut stored = entity.clone();
        stored.set_id(id);
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    /// Replaces an existing row with `merge(old, new)`. Returns `None` when
    /// the id is unknown.
    fn replace(
        &self,
        entity: &E,
        check: impl FnOnce(&BTreeMap<E::Id, E>) -> EstateResult<()>,
        merge: impl FnOnce(&E, E) -> E,
    ) -> EstateResult<Option<E>> {
        let mut state = self.state.write();
        let Some(existing) = state.rows.get(&entity.id()) else {
            return Ok(None);
        };
        check(&state.rows)?;

        let merged = merge(existing, entity.clone());
        state.rows.insert(entity.id(), merged.clone());
        Ok(Some(merged))
    }

    fn remove(&self, id: E::Id) -> bool {
        self.state.write().rows.remove(&id).is_some()
    }
}

/// In-memory user store.
pub struct InMemoryUserRepository {
    table: MemoryTable<User>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn username_taken(rows: &BTreeMap<UserId, User>, username: &str, except: Option<UserId>) -> bool {
    rows.values()
        .any(|u| u.username == username && Some(u.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> EstateResult<Option<User>> {
        debug!("Finding user by id: {}", id);
        Ok(self.table.get(id))
    }

    async fn find_by_username(&self, username: &str) -> EstateResult<Option<User>> {
        debug!("Finding user by username: {}", username);
        Ok(self.table.find(|u| u.username == username))
    }

    async fn find_all(&self) -> EstateResult<Vec<User>> {
        Ok(self.table.all())
    }

    async fn exists_by_id(&self, id: UserId) -> EstateResult<bool> {
        Ok(self.table.contains(id))
    }

    async fn exists_by_username(&self, username: &str) -> EstateResult<bool> {
        Ok(self.table.find(|u| u.username == username).is_some())
    }

    async fn save(&self, user: &User) -> EstateResult<User> {
        debug!("Saving new user: {}", user.username);
        self.table.insert(user, |rows| {
            if username_taken(rows, &user.username, None) {
                return Err(EstateError::duplicate_key(format!(
                    "username '{}' already exists",
                    user.username
                )));
            }
            Ok(())
        })
    }

    async fn update(&self, user: &User) -> EstateResult<User> {
        debug!("Updating user: {}", user.id);
        self.table
            .replace(
                user,
                |rows| {
                    if username_taken(rows, &user.username, Some(user.id)) {
                        return Err(EstateError::duplicate_key(format!(
                            "username '{}' already exists",
                            user.username
                        )));
                    }
                    Ok(())
                },
                |old, mut new| {
                    new.create_time = old.create_time;
                    new
                },
            )?
            .ok_or_else(|| EstateError::not_found("User", user.id))
    }

    async fn delete(&self, id: UserId) -> EstateResult<bool> {
        debug!("Deleting user: {}", id);
        Ok(self.table.remove(id))
    }
}

/// In-memory house store.
pub struct InMemoryHouseRepository {
    table: MemoryTable<House>,
}

impl InMemoryHouseRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryHouseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HouseRepository for InMemoryHouseRepository {
    async fn find_by_id(&self, id: HouseId) -> EstateResult<Option<House>> {
        debug!("Finding house by id: {}", id);
        Ok(self.table.get(id))
    }

    async fn find_all(&self) -> EstateResult<Vec<House>> {
        Ok(self.table.all())
    }

    async fn exists_by_id(&self, id: HouseId) -> EstateResult<bool> {
        Ok(self.table.contains(id))
    }

    async fn save(&self, house: &House) -> EstateResult<House> {
        self.table.insert(house, |_| Ok(()))
    }

    async fn update(&self, house: &House) -> EstateResult<House> {
        debug!("Updating house: {}", house.id);
        self.table
            .replace(house, |_| Ok(()), |_, new| new)?
            .ok_or_else(|| EstateError::not_found("House", house.id))
    }

    async fn delete(&self, id: HouseId) -> EstateResult<bool> {
        debug!("Deleting house: {}", id);
        Ok(self.table.remove(id))
    }
}
