//! HTTP middleware shared by every route.
//!
//! From the outside in: request ID assignment, request ID echo, per-route
//! metrics, then the request span with start/finish logs.

mod metrics;
mod request_id;
mod trace;

pub use metrics::{HttpMetrics, HttpMetricsLayer};
pub(crate) use metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION};
pub use request_id::REQUEST_ID_HEADER;
pub use trace::SortRequestSpan;

use axum::{extract::MatchedPath, http::Request, Router};
use batchsort_domain::SortMode;
use tower_http::trace::TraceLayer;

use crate::http::{PROCESS_CONCURRENT_PATH, PROCESS_SINGLE_PATH};

/// Route label for requests that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Mode label for routes that do not sort.
const NO_MODE: &str = "none";

/// Wraps `router` in the middleware stack.
pub fn apply_middleware(router: Router) -> Router {
    let (set_request_id, propagate_request_id) = request_id::layers();

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(SortRequestSpan)
                .on_request(trace::log_request_started)
                .on_response(trace::log_request_completed),
        )
        .layer(HttpMetricsLayer)
        .layer(propagate_request_id)
        .layer(set_request_id)
}

/// The matched route template, so labels never carry raw client paths.
fn route_of<B>(request: &Request<B>) -> &str {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
}

/// The sorter behind `route`.
fn mode_of(route: &str) -> &'static str {
    match route {
        PROCESS_SINGLE_PATH => SortMode::Sequential.as_str(),
        PROCESS_CONCURRENT_PATH => SortMode::Concurrent.as_str(),
        _ => NO_MODE,
    }
}
