//! Per-route HTTP metrics.
//!
//! - `batchsort_http_requests_total{route, mode, status}`
//! - `batchsort_http_request_duration_seconds{route, mode, status}`
//!
//! `mode` names the sorter behind the route (`sequential`, `concurrent`), or
//! `none` for `/health`, `/metrics` and unmatched paths. Decode rejections are
//! therefore counted against the endpoint that refused them.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use axum::http::{Request, Response};
use tower::{Layer, Service};

use super::{mode_of, route_of};

pub(crate) const HTTP_REQUESTS_TOTAL: &str = "batchsort_http_requests_total";
pub(crate) const HTTP_REQUEST_DURATION: &str = "batchsort_http_request_duration_seconds";

/// Layer producing [`HttpMetrics`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpMetricsLayer;

impl<S> Layer<S> for HttpMetricsLayer {
    type Service = HttpMetrics<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HttpMetrics { inner }
    }
}

/// Records one counter increment and one latency sample per response.
#[derive(Debug, Clone)]
pub struct HttpMetrics<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HttpMetrics<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let route = route_of(&request).to_string();
        let mode = mode_of(&route);

        // Take the service that was driven to readiness.
        let ready = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, ready);

        Box::pin(async move {
            let started = Instant::now();
            let response = inner.call(request).await?;

            let labels = [
                ("route", route),
                ("mode", mode.to_string()),
                ("status", response.status().as_u16().to_string()),
            ];
            metrics::counter!(HTTP_REQUESTS_TOTAL, &labels).increment(1);
            metrics::histogram!(HTTP_REQUEST_DURATION, &labels)
                .record(started.elapsed().as_secs_f64());

            Ok(response)
        })
    }
}
