//! # Estate Repository
//!
//! The store: the single source of truth for users and houses.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn HouseRepository>
//! MySqlUserRepository / MySqlHouseRepository   (SQLx, explicit transactions)
//!   or InMemoryUserRepository / InMemoryHouseRepository
//! ```

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
