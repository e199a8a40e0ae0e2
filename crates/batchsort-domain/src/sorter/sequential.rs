//! Sequential sorter.

use async_trait::async_trait;

use super::types::{SortMode, SortOutcome};
use super::unit::{single_unit_failure, sort_unit};
use super::BatchSorter;
use crate::error::SortResult;
use crate::timing::Stopwatch;

/// Sorts arrays one at a time, preserving input order.
///
/// Through [`BatchSorter`] the whole batch is one blocking unit: a single
/// thread sorts every array in order while the async worker stays free.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSorter;

impl SequentialSorter {
    pub fn new() -> Self {
        Self
    }

    /// Sorts on the calling thread; this path cannot fail.
    pub fn sort(&self, batch: &[Vec<i64>]) -> SortOutcome {
        let stopwatch = Stopwatch::start();
        let sorted = sort_in_order(batch.to_vec());
        SortOutcome::new(sorted, stopwatch.elapsed())
    }
}

fn sort_in_order(batch: Vec<Vec<i64>>) -> Vec<Vec<i64>> {
    batch.into_iter().map(sort_unit).collect()
}

#[async_trait]
impl BatchSorter for SequentialSorter {
    fn mode(&self) -> SortMode {
        SortMode::Sequential
    }

    async fn sort_batch(&self, batch: &[Vec<i64>]) -> SortResult<SortOutcome> {
        let stopwatch = Stopwatch::start();

        let copies = batch.to_vec();
        let sorted = tokio::task::spawn_blocking(move || sort_in_order(copies))
            .await
            .map_err(single_unit_failure)?;

        Ok(SortOutcome::new(sorted, stopwatch.elapsed()))
    }
}
