//! batchsort server binary.
//!
//! # Usage
//!
//! ```bash
//! # With config file
//! batchsort --config config.yaml
//!
//! # With environment variables only
//! BATCHSORT_SERVER__PORT=9000 BATCHSORT_SORTER__CONCURRENT_ORDER=input batchsort
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use batchsort_api::http::{
    create_router_with_body_limit, create_router_with_observability_and_limit, AppState,
};
use batchsort_api::observability::{init_logging, init_metrics};
use batchsort_server::ServerConfig;

/// batchsort - sorts batches of integer arrays over HTTP
#[derive(Parser, Debug)]
#[command(name = "batchsort")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(config_path) => ServerConfig::load(&config_path)?,
        None => ServerConfig::from_env()?,
    };

    init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        concurrent_order = config.sorter.concurrent_order.as_str(),
        "Starting batchsort server"
    );

    let state = AppState::new(config.sorter.concurrent_order);
    let body_limit = config.server.max_body_bytes;

    let router = if config.metrics.enabled {
        let metrics_state = init_metrics()?;
        info!("Metrics enabled at /metrics");
        create_router_with_observability_and_limit(state, metrics_state, body_limit)
    } else {
        create_router_with_body_limit(state, body_limit)
    };

    let addr = config.server.bind_addr()?;
    run_http_server(router, addr).await
}

/// Serves `router` on `addr` until Ctrl+C or SIGTERM, then drains in-flight requests.
async fn run_http_server(router: axum::Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_parsing() {
        let args = Args::try_parse_from(["batchsort"]).unwrap();
        assert!(args.config.is_none());

        let args = Args::try_parse_from(["batchsort", "--config", "config.yaml"]).unwrap();
        assert_eq!(args.config, Some("config.yaml".to_string()));

        let args = Args::try_parse_from(["batchsort", "-c", "test.yaml"]).unwrap();
        assert_eq!(args.config, Some("test.yaml".to_string()));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["batchsort", "--port", "9000"]).is_err());
    }
}
