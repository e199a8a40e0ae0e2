//! Tests for the batch sorters.

use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::error::SortError;

// ============================================================
// Test Helpers
// ============================================================

/// Sorts the outer collection so unordered output can be compared as a multiset.
fn as_multiset(mut arrays: Vec<Vec<i64>>) -> Vec<Vec<i64>> {
    arrays.sort();
    arrays
}

fn expected_sorted(batch: &[Vec<i64>]) -> Vec<Vec<i64>> {
    batch
        .iter()
        .map(|sequence| {
            let mut copy = sequence.clone();
            copy.sort();
            copy
        })
        .collect()
}

/// Unit that panics on arrays starting with -999 and sorts everything else.
fn poisoned_unit(mut sequence: Vec<i64>) -> Vec<i64> {
    if sequence.first() == Some(&-999) {
        panic!("poisoned input");
    }
    sequence.sort_unstable();
    sequence
}

/// Sorts `batch` with `sorter` on a current-thread runtime while a sibling
/// future tries to run. Returns whether the sibling ran before sorting ended,
/// which only happens when the sort yields the async worker.
async fn sibling_ran_during_sort(sorter: &dyn BatchSorter, batch: &[Vec<i64>]) -> bool {
    let sibling_ran = AtomicBool::new(false);

    let (observed, ()) = tokio::join!(
        async {
            sorter.sort_batch(batch).await.unwrap();
            sibling_ran.load(Ordering::SeqCst)
        },
        async {
            sibling_ran.store(true, Ordering::SeqCst);
        },
    );

    observed
}

/// Arrays large and scrambled enough that sorting takes real time.
fn large_batch() -> Vec<Vec<i64>> {
    (0..4)
        .map(|seed| {
            (0..1_000_000i64)
                .map(|i| (i * 2_654_435_761 + seed) % 1_000_003)
                .collect()
        })
        .collect()
}

fn sample_batch() -> Vec<Vec<i64>> {
    vec![
        vec![3, 1, 2],
        vec![5, -1, 0],
        vec![],
        vec![7, 7, 7, -7],
        vec![i64::MAX, i64::MIN, 0],
    ]
}

// ============================================================
// Sequential Sorter
// ============================================================

#[tokio::test]
async fn test_sequential_sorts_each_array_in_input_order() {
    let sorter = SequentialSorter::new();
    let batch = vec![vec![3, 1, 2], vec![5, -1, 0]];

    let outcome = sorter.sort_batch(&batch).await.unwrap();

    assert_eq!(outcome.sorted, vec![vec![1, 2, 3], vec![-1, 0, 5]]);
    assert!(outcome.time_ns() >= 0);
}

#[test]
fn test_sequential_does_not_mutate_input() {
    let batch = sample_batch();
    let snapshot = batch.clone();

    let outcome = SequentialSorter::new().sort(&batch);

    assert_eq!(batch, snapshot);
    assert_eq!(outcome.sorted, expected_sorted(&snapshot));
}

#[test]
fn test_sequential_empty_batch() {
    let outcome = SequentialSorter::new().sort(&[]);
    assert!(outcome.sorted.is_empty());
    assert_eq!(outcome.element_count(), 0);
}

#[test]
fn test_sequential_single_empty_array() {
    let outcome = SequentialSorter::new().sort(&[vec![]]);
    assert_eq!(outcome.sorted, vec![Vec::<i64>::new()]);
}

#[tokio::test]
async fn test_sequential_sort_leaves_async_worker_free() {
    let sorter = SequentialSorter::new();
    assert!(sibling_ran_during_sort(&sorter, &large_batch()).await);
}

#[test]
fn test_sequential_reports_mode() {
    assert_eq!(SequentialSorter::new().mode(), SortMode::Sequential);
}

// ============================================================
// Concurrent Sorter - completion order
// ============================================================

#[tokio::test]
async fn test_concurrent_returns_same_multiset_of_sorted_arrays() {
    let sorter = ConcurrentSorter::new();
    let batch = sample_batch();

    let outcome = sorter.sort_batch(&batch).await.unwrap();

    assert_eq!(outcome.sorted.len(), batch.len());
    assert_eq!(
        as_multiset(outcome.sorted),
        as_multiset(expected_sorted(&batch))
    );
}

#[tokio::test]
async fn test_concurrent_does_not_mutate_input() {
    let batch = sample_batch();
    let snapshot = batch.clone();

    ConcurrentSorter::new().sort_batch(&batch).await.unwrap();

    assert_eq!(batch, snapshot);
}

#[tokio::test]
async fn test_concurrent_empty_batch() {
    let outcome = ConcurrentSorter::new().sort_batch(&[]).await.unwrap();
    assert!(outcome.sorted.is_empty());
    assert!(outcome.time_ns() >= 0);
}

#[tokio::test]
async fn test_concurrent_single_empty_array() {
    let outcome = ConcurrentSorter::new().sort_batch(&[vec![]]).await.unwrap();
    assert_eq!(outcome.sorted, vec![Vec::<i64>::new()]);
}

/// Every unit appends exactly once, even with many units on several workers.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_no_lost_updates_under_fan_out() {
    let batch: Vec<Vec<i64>> = (0..1000)
        .map(|i| vec![i, -i, i * 31 % 17, 1000 - i])
        .collect();

    let outcome = ConcurrentSorter::new().sort_batch(&batch).await.unwrap();

    assert_eq!(outcome.sorted.len(), 1000);
    assert!(outcome
        .sorted
        .iter()
        .all(|array| array.windows(2).all(|w| w[0] <= w[1])));
    assert_eq!(
        as_multiset(outcome.sorted),
        as_multiset(expected_sorted(&batch))
    );
}

#[tokio::test]
async fn test_concurrent_reports_mode_and_default_order() {
    let sorter = ConcurrentSorter::new();
    assert_eq!(sorter.mode(), SortMode::Concurrent);
    assert_eq!(sorter.order(), CollectionOrder::Completion);
}

#[tokio::test]
async fn test_concurrent_units_leave_async_worker_free() {
    for order in [CollectionOrder::Completion, CollectionOrder::Input] {
        let sorter = ConcurrentSorter::with_order(order);
        assert!(
            sibling_ran_during_sort(&sorter, &large_batch()).await,
            "units must not sort on the async worker ({order:?})"
        );
    }
}

// ============================================================
// Concurrent Sorter - input order
// ============================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_input_order_is_index_aligned() {
    let sorter = ConcurrentSorter::with_order(CollectionOrder::Input);
    let batch: Vec<Vec<i64>> = (0..200).map(|i| vec![i * 3, i, -i]).collect();

    let outcome = sorter.sort_batch(&batch).await.unwrap();

    assert_eq!(outcome.sorted, expected_sorted(&batch));
}

#[tokio::test]
async fn test_concurrent_input_order_example() {
    let sorter = ConcurrentSorter::with_order(CollectionOrder::Input);
    let outcome = sorter
        .sort_batch(&[vec![3, 1, 2], vec![5, -1, 0]])
        .await
        .unwrap();
    assert_eq!(outcome.sorted, vec![vec![1, 2, 3], vec![-1, 0, 5]]);
}

// ============================================================
// Failure semantics
// ============================================================

#[tokio::test]
async fn test_concurrent_surfaces_failure_after_all_units_finish() {
    for order in [CollectionOrder::Completion, CollectionOrder::Input] {
        let sorter = ConcurrentSorter::with_order(order).with_unit(poisoned_unit);
        let batch = vec![vec![-999, 1], vec![2, 1], vec![-999, 5], vec![4, 3]];

        let err = sorter.sort_batch(&batch).await.unwrap_err();

        match err {
            SortError::UnitFailed {
                failed,
                total,
                message,
            } => {
                assert_eq!(failed, 2, "both poisoned units are counted ({order:?})");
                assert_eq!(total, 4);
                assert!(message.contains("poisoned input"), "message: {message}");
            }
        }
    }
}

#[tokio::test]
async fn test_concurrent_custom_unit_without_failures_succeeds() {
    let sorter = ConcurrentSorter::new().with_unit(poisoned_unit);
    let outcome = sorter.sort_batch(&[vec![2, 1], vec![9, 8]]).await.unwrap();
    assert_eq!(
        as_multiset(outcome.sorted),
        vec![vec![1, 2], vec![8, 9]]
    );
}

#[test]
fn test_unit_failed_error_message() {
    let err = SortError::UnitFailed {
        failed: 1,
        total: 3,
        message: "unit cancelled".to_string(),
    };
    assert_eq!(err.to_string(), "1 of 3 sort units failed: unit cancelled");
}

// ============================================================
// Types
// ============================================================

#[test]
fn test_sort_mode_labels() {
    assert_eq!(SortMode::Sequential.as_str(), "sequential");
    assert_eq!(SortMode::Concurrent.to_string(), "concurrent");
}

#[test]
fn test_collection_order_deserializes_lowercase() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        order: CollectionOrder,
    }

    let parsed: Wrapper = serde_json::from_str(r#"{"order":"input"}"#).unwrap();
    assert_eq!(parsed.order, CollectionOrder::Input);
    let parsed: Wrapper = serde_json::from_str(r#"{"order":"completion"}"#).unwrap();
    assert_eq!(parsed.order, CollectionOrder::Completion);
    assert!(serde_json::from_str::<Wrapper>(r#"{"order":"random"}"#).is_err());
}

#[test]
fn test_outcome_counts_elements() {
    let outcome = SortOutcome::new(
        vec![vec![1, 2], vec![], vec![3]],
        std::time::Duration::from_nanos(42),
    );
    assert_eq!(outcome.element_count(), 3);
    assert_eq!(outcome.time_ns(), 42);
}
