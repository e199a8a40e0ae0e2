//! Request span and start/finish logs, plugged into tower-http's `TraceLayer`.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response},
};
use tower_http::trace::MakeSpan;
use tracing::{field::Empty, info, info_span, Span};

use super::request_id::request_id;
use super::{mode_of, route_of};

const LOG_TARGET: &str = "batchsort::http";

/// Opens an `http_request` span carrying the route, the sort mode behind it
/// and the request ID. `status` is filled in when the response is ready.
///
/// Everything the handler logs, including "sort request decoded", nests
/// under this span.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortRequestSpan;

impl<B> MakeSpan<B> for SortRequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let route = route_of(request);
        info_span!(
            "http_request",
            method = %request.method(),
            route,
            mode = mode_of(route),
            request_id = request_id(request),
            status = Empty,
        )
    }
}

pub(super) fn log_request_started(request: &Request<Body>, _span: &Span) {
    info!(target: LOG_TARGET, uri = %request.uri(), "request started");
}

pub(super) fn log_request_completed(response: &Response<Body>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    span.record("status", status);
    info!(
        target: LOG_TARGET,
        status,
        latency_us = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX),
        "request completed"
    );
}
