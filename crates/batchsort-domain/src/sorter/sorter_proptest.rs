//! Property-based tests for the batch sorters.

use proptest::prelude::*;

use super::{BatchSorter, CollectionOrder, ConcurrentSorter, SequentialSorter};

/// Strategy for batches of small arrays, including empty ones.
fn batch_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(any::<i64>(), 0..32), 0..24)
}

fn is_ascending(array: &[i64]) -> bool {
    array.windows(2).all(|w| w[0] <= w[1])
}

fn same_elements(a: &[i64], b: &[i64]) -> bool {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort();
    b.sort();
    a == b
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn test_sequential_output_is_index_aligned_sort(batch in batch_strategy()) {
        let outcome = SequentialSorter::new().sort(&batch);

        prop_assert_eq!(outcome.sorted.len(), batch.len());
        for (input, output) in batch.iter().zip(&outcome.sorted) {
            prop_assert!(is_ascending(output));
            prop_assert!(same_elements(input, output));
        }
    }

    #[test]
    fn test_sorting_is_idempotent(batch in batch_strategy()) {
        let sorter = SequentialSorter::new();
        let once = sorter.sort(&batch).sorted;
        let twice = sorter.sort(&once).sorted;
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_concurrent_matches_sequential_as_multiset(batch in batch_strategy()) {
        let expected = SequentialSorter::new().sort(&batch).sorted;
        let outcome = block_on(ConcurrentSorter::new().sort_batch(&batch)).unwrap();

        let mut actual = outcome.sorted;
        let mut expected_sorted = expected;
        actual.sort();
        expected_sorted.sort();
        prop_assert_eq!(actual, expected_sorted);
    }

    #[test]
    fn test_concurrent_input_order_matches_sequential(batch in batch_strategy()) {
        let expected = SequentialSorter::new().sort(&batch).sorted;
        let sorter = ConcurrentSorter::with_order(CollectionOrder::Input);
        let outcome = block_on(sorter.sort_batch(&batch)).unwrap();
        prop_assert_eq!(outcome.sorted, expected);
    }
}
