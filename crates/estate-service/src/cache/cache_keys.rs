//! Cache key generators for consistent key naming.
//!
//! Keys look like `estate:cache:{type}:{id|all}`. The trailing `:` in each
//! type prefix keeps `user` from matching `userList`.

use estate_core::{HouseId, UserId};
use std::fmt::Display;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "estate:cache";

/// Key variant naming a whole-collection snapshot.
pub const ALL: &str = "all";

/// The fixed set of cached collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheType {
    /// Single users by id.
    User,
    /// The full user list.
    UserList,
    /// Single houses by id.
    House,
    /// The full house list.
    HouseList,
}

impl CacheType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::UserList => "userList",
            Self::House => "house",
            Self::HouseList => "houseList",
        }
    }

    /// Prefix shared by every key of this type.
    #[must_use]
    pub fn prefix(self) -> String {
        format!("{}:{}:", CACHE_PREFIX, self.as_str())
    }
}

/// Builds the key for `(cache_type, variant)`.
#[must_use]
pub fn key(cache_type: CacheType, variant: impl Display) -> String {
    format!("{}{}", cache_type.prefix(), variant)
}

#[must_use]
pub fn user_by_id(id: UserId) -> String {
    key(CacheType::User, id)
}

#[must_use]
pub fn user_list() -> String {
    key(CacheType::UserList, ALL)
}

#[must_use]
pub fn house_by_id(id: HouseId) -> String {
    key(CacheType::House, id)
}

#[must_use]
pub fn house_list() -> String {
    key(CacheType::HouseList, ALL)
}
