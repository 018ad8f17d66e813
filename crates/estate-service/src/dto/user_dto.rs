//! User-related DTOs.

use chrono::{DateTime, Utc};
use estate_core::validation::rules::not_blank;
use estate_core::{User, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        custom(function = "not_blank", message = "Username is required"),
        length(max = 50, message = "Username cannot exceed 50 characters")
    )]
    pub username: String,

    #[validate(
        custom(function = "not_blank", message = "Password is required"),
        length(max = 100, message = "Password cannot exceed 100 characters")
    )]
    pub password: String,

    #[validate(length(max = 50, message = "Nickname cannot exceed 50 characters"))]
    pub nickname: Option<String>,
}

/// Request to overwrite an existing user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub id: UserId,

    #[validate(
        custom(function = "not_blank", message = "Username is required"),
        length(max = 50, message = "Username cannot exceed 50 characters")
    )]
    pub username: String,

    #[validate(
        custom(function = "not_blank", message = "Password is required"),
        length(max = 100, message = "Password cannot exceed 100 characters")
    )]
    pub password: String,

    #[validate(length(max = 50, message = "Nickname cannot exceed 50 characters"))]
    pub nickname: Option<String>,
}

/// User response DTO. The password never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub nickname: Option<String>,
    pub create_time: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            nickname: user.nickname,
            create_time: user.create_time,
        }
    }
}
