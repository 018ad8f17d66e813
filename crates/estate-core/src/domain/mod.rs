//! Domain entities for Estate Cloud.

pub mod entities;

pub use entities::*;
