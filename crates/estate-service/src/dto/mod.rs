//! Request and response DTOs.

mod house_dto;
mod user_dto;

pub use house_dto::*;
pub use user_dto::*;
