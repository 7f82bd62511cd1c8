//! Startup orchestration.
//!
//! Any startup error is fatal. The listener is bound last, so traffic only
//! arrives once everything else is ready.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::{HttpServer, HttpServerError};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid {field} `{value}`")]
    Address { field: &'static str, value: String },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error(transparent)]
    Server(#[from] HttpServerError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Start the metrics exporter (if enabled), build the server and bind its
/// listener. The caller runs the returned server.
pub async fn start(config: RelayConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let observability = &config.observability;
    if observability.metrics_enabled {
        let addr = parse_addr("observability.metrics_address", &observability.metrics_address)?;
        metrics::init_metrics(addr)?;
    }

    let bind = parse_addr("listener.bind_address", &config.listener.bind_address)?;
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(bind)
        .await
        .map_err(|source| StartupError::Bind { addr: bind, source })?;

    Ok((server, listener))
}

fn parse_addr(field: &'static str, value: &str) -> Result<SocketAddr, StartupError> {
    value.parse().map_err(|_| StartupError::Address {
        field,
        value: value.to_string(),
    })
}
