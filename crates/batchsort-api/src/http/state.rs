//! Application state for HTTP handlers.

use std::sync::Arc;

use batchsort_domain::CollectionOrder;
use batchsort_server::SortHandler;

/// Application state shared across all HTTP handlers.
///
/// Holds no per-request data; every request builds and drops its own batch.
#[derive(Clone, Default)]
pub struct AppState {
    /// Dispatches batches to the sequential or concurrent sorter.
    pub sort_handler: Arc<SortHandler>,
}

impl AppState {
    /// Creates state whose concurrent sorter collects in the given order.
    pub fn new(order: CollectionOrder) -> Self {
        Self::with_handler(SortHandler::new(order))
    }

    /// Creates state around an existing handler.
    pub fn with_handler(sort_handler: SortHandler) -> Self {
        Self {
            sort_handler: Arc::new(sort_handler),
        }
    }
}
