//! HTTP endpoints.
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/process-single` | POST | Sort each array in order, one after another |
//! | `/process-concurrent` | POST | Sort each array in its own task |
//! | `/health` | GET | Liveness check |
//! | `/metrics` | GET | Prometheus metrics (observability router only) |
//!
//! Both sort endpoints take `{"to_sort": [[int, ...], ...]}` and answer
//! `{"sorted_arrays": [[int, ...], ...], "time_ns": <int64>}`. A body that
//! does not decode gets `400 Invalid JSON payload` as plain text.

pub mod routes;
pub mod state;

pub use routes::{
    create_router, create_router_with_body_limit, create_router_with_observability,
    create_router_with_observability_and_limit, ApiError, JsonPayload, PayloadRejection,
    ProcessRequest, ProcessResponse, INTERNAL_ERROR_MESSAGE, INVALID_JSON_MESSAGE,
    PROCESS_CONCURRENT_PATH, PROCESS_SINGLE_PATH,
};
pub use state::AppState;
