//! Domain error types for sort operations.

use thiserror::Error;

/// Domain-specific errors for batch sorting.
///
/// Sorting plain integers cannot fail, so the only failure is a unit that
/// never delivered its result (panicked or was cancelled). The sequential
/// sorter runs as a single unit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SortError {
    /// One or more sort units did not complete successfully.
    #[error("{failed} of {total} sort units failed: {message}")]
    UnitFailed {
        failed: usize,
        total: usize,
        /// Description of the first observed failure.
        message: String,
    },
}

/// Result type for sort operations.
pub type SortResult<T> = Result<T, SortError>;
