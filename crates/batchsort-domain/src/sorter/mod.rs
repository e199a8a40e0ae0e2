//! Batch sorters.
//!
//! Two implementations share the [`BatchSorter`] seam:
//!
//! 1. [`SequentialSorter`]: sorts each array in input order on one blocking worker
//! 2. [`ConcurrentSorter`]: spawns one unit per array and waits for all of them
//!
//! Both copy each array before sorting and time the whole batch, never an
//! individual array.

mod concurrent;
mod sequential;
mod types;
mod unit;

#[cfg(test)]
mod sorter_proptest;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::error::SortResult;

pub use concurrent::ConcurrentSorter;
pub use sequential::SequentialSorter;
pub use types::{CollectionOrder, SortMode, SortOutcome};

/// Sorts every array of a batch in ascending order.
#[async_trait]
pub trait BatchSorter: Send + Sync {
    /// The processing path this sorter implements.
    fn mode(&self) -> SortMode;

    /// Sorts a copy of every array in `batch` and reports the elapsed time.
    ///
    /// The input is never mutated. The output always has one entry per input
    /// array; whether entry `i` corresponds to input `i` depends on the sorter.
    async fn sort_batch(&self, batch: &[Vec<i64>]) -> SortResult<SortOutcome>;
}
