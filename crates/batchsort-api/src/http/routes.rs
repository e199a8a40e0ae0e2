//! HTTP route definitions and handlers.

use std::fmt;
use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{
    de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error};

use batchsort_domain::SortError;
use batchsort_server::{SortRequest, SortResponse};

use super::state::AppState;
use crate::middleware::apply_middleware;
use crate::observability::{metrics_handler, MetricsState};

/// Body of a 400 response for a request that does not decode.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";

/// Body of a 500 response. Details go to the log, not the client.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Payload too large";

/// Route served by the sequential sorter.
pub const PROCESS_SINGLE_PATH: &str = "/process-single";

/// Route served by the concurrent sorter.
pub const PROCESS_CONCURRENT_PATH: &str = "/process-concurrent";

// ============================================================
// Wire Format
// ============================================================

/// Field carrying the batch. Matched without regard to ASCII case.
const TO_SORT_FIELD: &str = "to_sort";

/// Request body for both sort endpoints.
///
/// Decoding is lenient in the ways a JSON client may rely on:
/// - the `to_sort` key matches in any case (`To_Sort`, `TO_SORT`); when it
///   appears more than once the last occurrence wins,
/// - a missing or `null` `to_sort` is an empty batch,
/// - a `null` document is an empty batch,
/// - unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessRequest {
    pub to_sort: Option<Vec<Vec<i64>>>,
}

impl ProcessRequest {
    pub fn into_arrays(self) -> Vec<Vec<i64>> {
        self.to_sort.unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for ProcessRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(ProcessRequestVisitor)
    }
}

struct ProcessRequestVisitor;

impl<'de> Visitor<'de> for ProcessRequestVisitor {
    type Value = ProcessRequest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with a `to_sort` array of integer arrays, or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ProcessRequest::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ProcessRequest::default())
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = ProcessRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case(TO_SORT_FIELD) {
                request.to_sort = map.next_value()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(request)
    }
}

/// Response body for both sort endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessResponse {
    pub sorted_arrays: Vec<Vec<i64>>,
    pub time_ns: i64,
}

impl From<SortResponse> for ProcessResponse {
    fn from(response: SortResponse) -> Self {
        Self {
            sorted_arrays: response.sorted_arrays,
            time_ns: response.time_ns,
        }
    }
}

// ============================================================
// Extraction
// ============================================================

/// JSON extractor that answers every decode failure with a plain-text 400.
///
/// Unlike [`axum::Json`] it ignores `Content-Type` and never produces 415 or
/// 422. A 413 from a configured body limit is preserved.
pub struct JsonPayload<T>(pub T);

/// Rejection produced by [`JsonPayload`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadRejection {
    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),

    #[error("payload too large")]
    TooLarge,
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        match self {
            PayloadRejection::InvalidJson(_) => {
                (StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE).into_response()
            }
            PayloadRejection::TooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE_MESSAGE).into_response()
            }
        }
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                PayloadRejection::TooLarge
            } else {
                PayloadRejection::InvalidJson(rejection.body_text())
            }
        })?;

        // One complete JSON document: anything after it, even another valid
        // value, is malformed.
        serde_json::from_slice(&bytes).map(JsonPayload).map_err(|e| {
            debug!(error = %e, "rejecting undecodable request body");
            PayloadRejection::InvalidJson(e.to_string())
        })
    }
}

// ============================================================
// Error Handling
// ============================================================

/// Errors surfaced by the sort endpoints after decoding succeeded.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("sort failed: {0}")]
    Sort(#[from] SortError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
    }
}

// ============================================================
// Routers
// ============================================================

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(PROCESS_SINGLE_PATH, post(process_single))
        .route(PROCESS_CONCURRENT_PATH, post(process_concurrent))
}

/// Disables axum's default 2MB cap and applies `body_limit` if one is set.
fn with_body_limit(router: Router<Arc<AppState>>, body_limit: Option<usize>) -> Router<Arc<AppState>> {
    let router = router.layer(DefaultBodyLimit::disable());
    match body_limit {
        Some(limit) => router.layer(RequestBodyLimitLayer::new(limit)),
        None => router,
    }
}

/// Creates the HTTP router with the sort endpoints and `/health`.
///
/// Request bodies are not size-capped.
pub fn create_router(state: AppState) -> Router {
    create_router_with_body_limit(state, None)
}

/// Creates the HTTP router with an optional body size limit in bytes.
pub fn create_router_with_body_limit(state: AppState, body_limit: Option<usize>) -> Router {
    let router = with_body_limit(api_routes(), body_limit)
        .route("/health", get(health_check))
        .with_state(Arc::new(state));

    apply_middleware(router)
}

/// Creates the HTTP router with the `/metrics` endpoint added.
pub fn create_router_with_observability(state: AppState, metrics_state: MetricsState) -> Router {
    create_router_with_observability_and_limit(state, metrics_state, None)
}

/// Creates the HTTP router with `/metrics` and an optional body size limit.
pub fn create_router_with_observability_and_limit(
    state: AppState,
    metrics_state: MetricsState,
    body_limit: Option<usize>,
) -> Router {
    let api_router = with_body_limit(api_routes(), body_limit)
        .route("/health", get(health_check))
        .with_state(Arc::new(state));

    let observability_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_state);

    apply_middleware(api_router.merge(observability_router))
}

// ============================================================
// Handlers
// ============================================================

/// `POST /process-single`: sorted arrays in input order.
async fn process_single(
    State(state): State<Arc<AppState>>,
    JsonPayload(body): JsonPayload<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let request = SortRequest::sequential(body.into_arrays());
    let response = state.sort_handler.handle(request).await?;
    Ok(Json(response.into()))
}

/// `POST /process-concurrent`: one task per array, output order depends on
/// the configured collection order.
async fn process_concurrent(
    State(state): State<Arc<AppState>>,
    JsonPayload(body): JsonPayload<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let request = SortRequest::concurrent(body.into_arrays());
    let response = state.sort_handler.handle(request).await?;
    Ok(Json(response.into()))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
