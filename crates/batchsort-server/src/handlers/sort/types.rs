//! Data types for sort requests.

use batchsort_domain::{SortMode, SortOutcome};

/// A decoded batch and the path that should sort it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    /// Which sorter handles the batch.
    pub mode: SortMode,
    /// The arrays to sort.
    pub arrays: Vec<Vec<i64>>,
}

impl SortRequest {
    /// Creates a request for the sequential sorter.
    pub fn sequential(arrays: Vec<Vec<i64>>) -> Self {
        Self {
            mode: SortMode::Sequential,
            arrays,
        }
    }

    /// Creates a request for the concurrent sorter.
    pub fn concurrent(arrays: Vec<Vec<i64>>) -> Self {
        Self {
            mode: SortMode::Concurrent,
            arrays,
        }
    }

    /// Number of integers across all arrays.
    pub fn element_count(&self) -> usize {
        self.arrays.iter().map(Vec::len).sum()
    }
}

/// Sorted arrays and the elapsed time of the whole sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortResponse {
    pub sorted_arrays: Vec<Vec<i64>>,
    /// Nanoseconds spent sorting, never negative.
    pub time_ns: i64,
}

impl From<SortOutcome> for SortResponse {
    fn from(outcome: SortOutcome) -> Self {
        let time_ns = outcome.time_ns();
        Self {
            sorted_arrays: outcome.sorted,
            time_ns,
        }
    }
}
