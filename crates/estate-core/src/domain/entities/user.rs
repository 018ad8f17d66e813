//! User entity.

use crate::{Entity, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// `username` is unique across all users. `create_time` is stamped once when
/// the entity is built for insertion and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    /// Unique login name.
    pub username: String,

    /// Opaque credential string.
    pub password: String,

    /// Display name.
    pub nickname: Option<String>,

    /// Creation timestamp.
    pub create_time: DateTime<Utc>,
}

impl User {
    /// Creates a user that has not been stored yet.
    #[must_use]
    pub fn new(username: String, password: String, nickname: Option<String>) -> Self {
        Self {
            id: UserId::UNASSIGNED,
            username,
            password,
            nickname,
            create_time: Utc::now(),
        }
    }

    /// Replaces every mutable field with the given values, keeping `id` and
    /// `create_time`.
    pub fn overwrite(&mut self, username: String, password: String, nickname: Option<String>) {
        self.username = username;
        self.password = password;
        self.nickname = nickname;
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }
}
