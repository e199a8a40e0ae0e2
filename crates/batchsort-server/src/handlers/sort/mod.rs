//! Sort handler.
//!
//! Routes a decoded batch to the sequential or concurrent sorter and wraps
//! the result with its elapsed time.
//!
//! The HTTP layer (`batchsort-api`) owns the wire format (`to_sort`,
//! `sorted_arrays`, `time_ns`) and maps it to and from the plain types here.

mod handler;
mod types;

pub use handler::SortHandler;
pub use types::{SortRequest, SortResponse};
