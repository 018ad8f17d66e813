//! # Estate REST
//!
//! HTTP front of Estate Cloud: user and house endpoints under `/api`, plus
//! health, readiness and liveness endpoints.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
