//! Concurrent fan-out/fan-in sorter.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::debug;

use super::types::{CollectionOrder, SortMode, SortOutcome};
use super::unit::{SortUnit, UnitFailures};
use super::BatchSorter;
use crate::error::SortResult;
use crate::timing::Stopwatch;

/// Sorts every array of a batch in its own concurrent unit.
///
/// One unit is spawned per input array with no upper bound. Units run on the
/// blocking pool, so a large array never holds up an async worker. The caller
/// waits until every unit has finished, successful or not, before the result
/// is read and the elapsed time is taken.
///
/// With [`CollectionOrder::Completion`] units append to a shared collection
/// under a mutex, so output order is whatever order the units finished in.
/// With [`CollectionOrder::Input`] each unit's result lands in the slot of its
/// input index and no lock is taken.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentSorter {
    order: CollectionOrder,
    #[cfg(test)]
    unit: SortUnit,
}

impl Default for ConcurrentSorter {
    fn default() -> Self {
        Self::with_order(CollectionOrder::default())
    }
}

impl ConcurrentSorter {
    /// Creates a sorter that collects results in completion order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sorter with the given collection order.
    pub fn with_order(order: CollectionOrder) -> Self {
        Self {
            order,
            #[cfg(test)]
            unit: super::unit::sort_unit,
        }
    }

    /// The collection order this sorter uses.
    pub fn order(&self) -> CollectionOrder {
        self.order
    }

    /// Replaces the per-unit work so failing units can be simulated.
    #[cfg(test)]
    pub(crate) fn with_unit(mut self, unit: SortUnit) -> Self {
        self.unit = unit;
        self
    }

    #[cfg(test)]
    fn unit(&self) -> SortUnit {
        self.unit
    }

    #[cfg(not(test))]
    fn unit(&self) -> SortUnit {
        super::unit::sort_unit
    }

    async fn collect_by_completion(&self, batch: &[Vec<i64>]) -> SortResult<Vec<Vec<i64>>> {
        let shared = Arc::new(Mutex::new(Vec::with_capacity(batch.len())));
        let mut units = JoinSet::new();

        for sequence in batch {
            // Each unit owns a private copy of its array.
            let copy = sequence.clone();
            let shared = Arc::clone(&shared);
            let unit = self.unit();
            units.spawn_blocking(move || {
                let sorted = unit(copy);
                shared.blocking_lock().push(sorted);
            });
        }

        let mut failures = UnitFailures::new(batch.len());
        while let Some(joined) = units.join_next().await {
            if let Err(err) = joined {
                failures.record(err);
            }
        }
        failures.into_result()?;

        let sorted = std::mem::take(&mut *shared.lock().await);
        Ok(sorted)
    }

    async fn collect_by_input(&self, batch: &[Vec<i64>]) -> SortResult<Vec<Vec<i64>>> {
        let mut slots: Vec<Option<Vec<i64>>> = vec![None; batch.len()];
        let mut units = JoinSet::new();

        for (index, sequence) in batch.iter().enumerate() {
            let copy = sequence.clone();
            let unit = self.unit();
            units.spawn_blocking(move || (index, unit(copy)));
        }

        let mut failures = UnitFailures::new(batch.len());
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok((index, sorted)) => slots[index] = Some(sorted),
                Err(err) => failures.record(err),
            }
        }
        failures.into_result()?;

        // Every slot is filled once no unit failed.
        Ok(slots.into_iter().flatten().collect())
    }
}

#[async_trait]
impl BatchSorter for ConcurrentSorter {
    fn mode(&self) -> SortMode {
        SortMode::Concurrent
    }

    async fn sort_batch(&self, batch: &[Vec<i64>]) -> SortResult<SortOutcome> {
        let stopwatch = Stopwatch::start();

        debug!(
            units = batch.len(),
            order = self.order.as_str(),
            "spawning sort units"
        );

        let sorted = match self.order {
            CollectionOrder::Completion => self.collect_by_completion(batch).await?,
            CollectionOrder::Input => self.collect_by_input(batch).await?,
        };

        Ok(SortOutcome::new(sorted, stopwatch.elapsed()))
    }
}
