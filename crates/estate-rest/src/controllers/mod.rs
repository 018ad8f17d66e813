//! REST API controllers.

pub mod health_controller;
pub mod house_controller;
pub mod user_controller;

pub use health_controller::*;

use crate::responses::AppError;
use estate_core::EstateError;
use std::str::FromStr;

/// Parses a path id, rejecting non-numeric input as a validation error.
pub(crate) fn parse_id<I: FromStr>(raw: &str, resource_type: &str) -> Result<I, AppError> {
    raw.parse().map_err(|_| {
        AppError(EstateError::validation(format!(
            "Invalid {resource_type} id: {raw}"
        )))
    })
}
