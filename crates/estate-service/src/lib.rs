//! # Estate Service
//!
//! Entity services for users and houses and the cache they sit on.
//!
//! Reads go cache first and fall back to the store; writes go to the store
//! and then invalidate (or refresh) the affected cache entries.

pub mod cache;
pub mod dto;
pub mod house_service;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use house_service::*;
pub use r#impl::{HouseServiceImpl, UserServiceImpl};
pub use user_service::*;
