//! Result type aliases for Estate Cloud.

use crate::EstateError;

/// A specialized `Result` type for Estate operations.
pub type EstateResult<T> = Result<T, EstateError>;
