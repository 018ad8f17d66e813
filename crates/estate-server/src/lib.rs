//! # Estate Server Library
//!
//! Wiring and startup helpers for the Estate Cloud binary.

pub mod di;
pub mod startup;
