//! Request ID assignment.
//!
//! A client-supplied `x-request-id` is kept; otherwise a UUIDv4 is assigned.
//! Either way the ID is echoed on the response.

use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// HTTP header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub(super) fn layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    (
        SetRequestIdLayer::new(header.clone(), MakeRequestUuid),
        PropagateRequestIdLayer::new(header),
    )
}

/// The request's ID, or `-` before one has been assigned.
pub(super) fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
}
