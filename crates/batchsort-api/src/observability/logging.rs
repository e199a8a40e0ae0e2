//! Log output for the server binary.
//!
//! Text for development, or one JSON object per line for log shippers. In
//! JSON mode each line carries the enclosing `http_request` span, so a sort
//! log can be tied to its route, sort mode and request ID:
//!
//! ```json
//! {"timestamp":"...","level":"INFO","fields":{"message":"sort request decoded","arrays":3,"elements":12},"target":"batchsort_server::handlers::sort::handler","span":{"method":"POST","mode":"concurrent","name":"http_request","request_id":"...","route":"/process-concurrent"}}
//! ```
//!
//! `RUST_LOG`, when set, replaces the configured level.

use batchsort_server::config::LoggingSettings;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, MakeWriter},
    prelude::*,
    registry::LookupSpan,
    util::TryInitError,
    EnvFilter, Layer, Registry,
};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unknown log level: {0}")]
    InvalidLevel(String),

    #[error("failed to install log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Installs the global subscriber described by `settings`.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let filter = env_filter(&settings.level)?;

    let output: Box<dyn Layer<Registry> + Send + Sync> = if settings.json {
        json_layer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()?;
    Ok(())
}

fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let level: Level = level
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))?;

    Ok(EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy())
}

fn json_layer<S, W>(writer: W) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .with_writer(writer)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
}
