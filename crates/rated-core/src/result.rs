//! Result type aliases for the Rated backend.

use crate::RatedError;

/// A specialized `Result` type for Rated operations.
pub type RatedResult<T> = Result<T, RatedError>;
