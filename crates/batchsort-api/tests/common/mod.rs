//! Shared test utilities for batchsort API tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use rand::Rng;
use tower::ServiceExt;

use batchsort_api::http::{create_router, AppState};
use batchsort_domain::CollectionOrder;

// =============================================================================
// Test Constants
// =============================================================================

/// Sub-arrays in a large concurrent batch.
pub const LARGE_BATCH_ARRAYS: usize = 1000;

/// Maximum length of a generated sub-array.
pub const MAX_ARRAY_LEN: usize = 50;

/// Requests in flight at once for stress tests.
pub const STRESS_TEST_CONCURRENT_REQUESTS: usize = 200;

/// Timeout for stress test completion.
pub const STRESS_TEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const PROCESS_SINGLE: &str = "/process-single";
pub const PROCESS_CONCURRENT: &str = "/process-concurrent";

// =============================================================================
// App Construction
// =============================================================================

/// Creates a router with default state (completion-ordered concurrent sorter).
pub fn create_test_app() -> axum::Router {
    create_router(AppState::default())
}

/// Creates a router whose concurrent sorter collects in `order`.
pub fn create_test_app_with_order(order: CollectionOrder) -> axum::Router {
    create_router(AppState::new(order))
}

// =============================================================================
// Requests
// =============================================================================

/// Make a JSON POST request and return status + parsed JSON response.
///
/// Non-JSON bodies (plain-text errors) come back as `{"raw_body": ...}`.
pub async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let (status, body) = post_raw(app, uri, &body.to_string()).await;
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|_| serde_json::json!({ "raw_body": body }));
    (status, json)
}

/// Make a POST request with a raw string body and return status + body text.
pub async fn post_raw(app: axum::Router, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&body).to_string())
}

// =============================================================================
// Data
// =============================================================================

/// Generates `count` random arrays, each with up to [`MAX_ARRAY_LEN`] elements.
pub fn random_batch(count: usize) -> Vec<Vec<i64>> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..=MAX_ARRAY_LEN);
            (0..len)
                .map(|_| rng.gen_range(-1_000_000i64..=1_000_000))
                .collect()
        })
        .collect()
}

/// Parses `sorted_arrays` out of a response body.
pub fn sorted_arrays(response: &serde_json::Value) -> Vec<Vec<i64>> {
    serde_json::from_value(response["sorted_arrays"].clone()).unwrap()
}

/// Each input array sorted, with the list itself sorted so order is ignored.
pub fn expected_multiset(batch: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let mut expected: Vec<Vec<i64>> = batch
        .iter()
        .map(|array| {
            let mut array = array.clone();
            array.sort_unstable();
            array
        })
        .collect();
    expected.sort();
    expected
}

/// Sorts the outer list so two results can be compared as multisets.
pub fn as_multiset(mut arrays: Vec<Vec<i64>>) -> Vec<Vec<i64>> {
    arrays.sort();
    arrays
}
