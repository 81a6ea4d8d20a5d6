//! Result type aliases for Recall.

use crate::RecallError;

/// A specialized `Result` type for Recall operations.
pub type RecallResult<T> = Result<T, RecallError>;
