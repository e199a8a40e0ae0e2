//! batchsort-domain: Core batch sorting logic
//!
//! This crate contains the sorting core:
//! - Sequential sorter (input-ordered, single task)
//! - Concurrent sorter (one task per array, fan-out/fan-in)
//! - Whole-operation timing
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              batchsort-domain                │
//! ├─────────────────────────────────────────────┤
//! │  sorter/  - BatchSorter trait + sorters     │
//! │  timing   - Stopwatch and ns conversion     │
//! │  error    - Sort errors                     │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod sorter;
pub mod timing;

// Re-export commonly used types at the crate root
pub use error::{SortError, SortResult};
pub use sorter::{
    BatchSorter, CollectionOrder, ConcurrentSorter, SequentialSorter, SortMode, SortOutcome,
};
pub use timing::Stopwatch;
