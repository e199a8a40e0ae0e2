//! Data types for sort operations.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timing::elapsed_nanos;

/// Which processing path handled a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Arrays sorted one after another by a single worker.
    Sequential,
    /// One concurrent unit per array.
    Concurrent,
}

impl SortMode {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Sequential => "sequential",
            SortMode::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the concurrent sorter gathers results from its units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionOrder {
    /// Units append to a shared collection under a lock as they finish.
    /// Output order follows completion order and is unspecified.
    #[default]
    Completion,
    /// Units return index-tagged results written into preallocated slots.
    /// Output order matches input order.
    Input,
}

impl CollectionOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionOrder::Completion => "completion",
            CollectionOrder::Input => "input",
        }
    }
}

/// Sorted arrays plus the wall-clock time of the whole operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    /// Ascending-sorted copies of the input arrays.
    pub sorted: Vec<Vec<i64>>,
    /// Time from before the first array was touched to after the last finished.
    pub elapsed: Duration,
}

impl SortOutcome {
    pub fn new(sorted: Vec<Vec<i64>>, elapsed: Duration) -> Self {
        Self { sorted, elapsed }
    }

    /// Elapsed time in nanoseconds, saturating at `i64::MAX`.
    pub fn time_ns(&self) -> i64 {
        elapsed_nanos(self.elapsed)
    }

    /// Number of integers across all sorted arrays.
    pub fn element_count(&self) -> usize {
        self.sorted.iter().map(Vec::len).sum()
    }
}
