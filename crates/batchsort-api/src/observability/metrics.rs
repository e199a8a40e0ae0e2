//! Prometheus metrics infrastructure.
//!
//! Metrics go through the `metrics` facade and are exported with
//! `metrics-exporter-prometheus`.
//!
//! # Metrics Exposed
//!
//! - `batchsort_http_requests_total` - HTTP requests by route, sort mode, status
//! - `batchsort_http_request_duration_seconds` - HTTP request duration by route, sort mode, status
//! - `batchsort_sort_requests_total` - Sort requests by mode
//! - `batchsort_sort_failures_total` - Sort requests that failed, by mode
//! - `batchsort_sort_duration_seconds` - Whole-batch sort duration by mode
//! - `batchsort_sort_arrays_total` - Arrays sorted, by mode

use std::sync::Arc;

use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::middleware::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION};

/// Shared state containing the Prometheus handle for metrics rendering.
#[derive(Clone)]
pub struct MetricsState {
    handle: Arc<PrometheusHandle>,
}

impl MetricsState {
    pub fn new(handle: PrometheusHandle) -> Self {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// Renders the current metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Error type for metrics initialization.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("failed to install Prometheus recorder: recorder already installed")]
    AlreadyInstalled,
}

/// Installs the global Prometheus recorder.
///
/// Must be called once at startup, before any metric is recorded.
pub fn init_metrics() -> Result<MetricsState, MetricsError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|_| MetricsError::AlreadyInstalled)?;

    register_default_metrics();

    Ok(MetricsState::new(handle))
}

fn register_default_metrics() {
    metrics::describe_counter!(
        HTTP_REQUESTS_TOTAL,
        "Total number of HTTP requests by route and sort mode"
    );
    metrics::describe_histogram!(
        HTTP_REQUEST_DURATION,
        "HTTP request duration in seconds by route and sort mode"
    );

    metrics::describe_counter!(
        "batchsort_sort_requests_total",
        "Total number of sort requests by mode"
    );
    metrics::describe_counter!(
        "batchsort_sort_failures_total",
        "Total number of failed sort requests by mode"
    );
    metrics::describe_histogram!(
        "batchsort_sort_duration_seconds",
        "Whole-batch sort duration in seconds by mode"
    );
    metrics::describe_counter!(
        "batchsort_sort_arrays_total",
        "Total number of arrays sorted by mode"
    );
}

/// Prometheus exposition format content type.
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Handler for the `/metrics` endpoint.
pub async fn metrics_handler(State(state): State<MetricsState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], state.render())
}
