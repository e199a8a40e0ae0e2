//! Sort handler implementation.

use std::sync::Arc;

use batchsort_domain::{
    BatchSorter, CollectionOrder, ConcurrentSorter, SequentialSorter, SortMode, SortResult,
};
use tracing::{debug, error, info};

use super::types::{SortRequest, SortResponse};

/// Handler for sort requests.
///
/// Holds one sorter per [`SortMode`]. Each call is self-contained: nothing
/// is shared between requests besides the sorters themselves, which are
/// stateless.
#[derive(Clone)]
pub struct SortHandler {
    sequential: Arc<dyn BatchSorter>,
    concurrent: Arc<dyn BatchSorter>,
}

impl Default for SortHandler {
    fn default() -> Self {
        Self::new(CollectionOrder::default())
    }
}

impl SortHandler {
    /// Creates a handler with the built-in sorters.
    ///
    /// `order` selects how the concurrent sorter gathers results.
    pub fn new(order: CollectionOrder) -> Self {
        Self::with_sorters(
            Arc::new(SequentialSorter::new()),
            Arc::new(ConcurrentSorter::with_order(order)),
        )
    }

    /// Creates a handler with caller-supplied sorters.
    pub fn with_sorters(sequential: Arc<dyn BatchSorter>, concurrent: Arc<dyn BatchSorter>) -> Self {
        Self {
            sequential,
            concurrent,
        }
    }

    /// Returns the sorter serving `mode`.
    pub fn sorter(&self, mode: SortMode) -> &dyn BatchSorter {
        match mode {
            SortMode::Sequential => self.sequential.as_ref(),
            SortMode::Concurrent => self.concurrent.as_ref(),
        }
    }

    /// Sorts the request's batch with the sorter for its mode.
    ///
    /// The decoded request is logged before any sorting starts.
    pub async fn handle(&self, request: SortRequest) -> SortResult<SortResponse> {
        let mode = request.mode;
        let labels = [("mode", mode.as_str())];

        info!(
            mode = %mode,
            arrays = request.arrays.len(),
            elements = request.element_count(),
            "sort request decoded"
        );
        debug!(mode = %mode, to_sort = ?request.arrays, "sort request payload");

        metrics::counter!("batchsort_sort_requests_total", &labels).increment(1);

        let outcome = match self.sorter(mode).sort_batch(&request.arrays).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(mode = %mode, error = %e, "sort failed");
                metrics::counter!("batchsort_sort_failures_total", &labels).increment(1);
                return Err(e);
            }
        };

        metrics::histogram!("batchsort_sort_duration_seconds", &labels)
            .record(outcome.elapsed.as_secs_f64());
        metrics::counter!("batchsort_sort_arrays_total", &labels)
            .increment(outcome.sorted.len() as u64);

        debug!(
            mode = %mode,
            arrays = outcome.sorted.len(),
            time_ns = outcome.time_ns(),
            "sort request completed"
        );

        Ok(SortResponse::from(outcome))
    }
}
