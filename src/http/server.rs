//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router mounting the relay on every path and method
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener
//! - Stop when the caller's shutdown future resolves

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Uri,
    response::Response,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::request::{request_id_layer, request_span};
use crate::observability::TelemetryObserver;
use crate::relay::{HttpUpstream, Relay};

/// Error type for server construction.
#[derive(Debug, Error)]
pub enum HttpServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub relay: Relay,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a server that forwards to `config.upstream.origin` over
    /// `reqwest` and reports through `TelemetryObserver`.
    pub fn new(config: RelayConfig) -> Result<Self, HttpServerError> {
        let upstream = HttpUpstream::new()?;
        let relay = Relay::new(config.upstream.origin.as_str(), Arc::new(upstream))
            .with_observer(Arc::new(TelemetryObserver));
        Ok(Self::with_relay(config, relay))
    }

    /// Create a server around an already-built relay.
    pub fn with_relay(config: RelayConfig, relay: Relay) -> Self {
        let router = Self::build_router(AppState { relay });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(request_id_layer())
                    .layer(
                        TraceLayer::new_for_http().make_span_with(request_span::<Body>),
                    ),
            )
    }

    /// The router, for serving in-process without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` resolves. In-flight relays are allowed to finish.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.origin,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay handler. The method, headers, body and query are ignored.
async fn relay_handler(State(state): State<AppState>, uri: Uri) -> Response {
    state.relay.handle(uri.path()).await
}
