//! Observability infrastructure for batchsort.
//!
//! This module provides:
//! - Prometheus metrics endpoint
//! - Structured logging configuration

mod logging;
mod metrics;

pub use logging::{init_logging, LoggingError};
pub use metrics::{init_metrics, metrics_handler, MetricsError, MetricsState};
