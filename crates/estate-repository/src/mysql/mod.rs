//! MySQL repository implementations.

mod house_repository;
mod user_repository;

pub use house_repository::MySqlHouseRepository;
pub use user_repository::MySqlUserRepository;

use estate_core::{EstateError, EstateResult};

/// Converts the auto-increment id reported by MySQL.
fn inserted_id(last_insert_id: u64) -> EstateResult<i64> {
    i64::try_from(last_insert_id)
        .map_err(|_| EstateError::Internal(format!("Inserted id {last_insert_id} out of range")))
}
