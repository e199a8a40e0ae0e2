//! batchsort-server: Request handlers and configuration
//!
//! This crate sits between the HTTP layer and the sorting core:
//! - Sort handler that logs, dispatches and meters each request
//! - Configuration management
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             batchsort-server                 │
//! ├─────────────────────────────────────────────┤
//! │  config.rs   - Configuration management     │
//! │  handlers/   - Request handlers             │
//! │    sort/          - Sequential/concurrent   │
//! └─────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod handlers;

// Re-exports for convenience
pub use config::{ConfigLoadError, ServerConfig};
pub use handlers::sort::{SortHandler, SortRequest, SortResponse};
