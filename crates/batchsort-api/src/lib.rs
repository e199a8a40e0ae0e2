//! batchsort-api: HTTP API layer
//!
//! This crate provides the API layer including:
//! - HTTP endpoints via Axum
//! - Middleware (request IDs, metrics, tracing, logging)
//! - Observability setup (structured logging, Prometheus)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               batchsort-api                  │
//! ├─────────────────────────────────────────────┤
//! │  http/          - HTTP endpoints            │
//! │  middleware/    - Request IDs, metrics, ... │
//! │  observability/ - Logging and metrics setup │
//! └─────────────────────────────────────────────┘
//! ```

pub mod http;
pub mod middleware;
pub mod observability;
