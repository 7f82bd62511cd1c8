//! Relay observation hooks.

use std::time::Duration;

use axum::http::StatusCode;

use crate::observability::metrics;
use crate::relay::UpstreamError;

/// Callbacks invoked by the relay at fixed points.
///
/// All methods default to doing nothing.
pub trait RelayObserver: Send + Sync + 'static {
    /// Before the upstream request is sent.
    fn on_dispatch(&self, _target: &str) {}

    /// After the upstream response head arrived, whatever its status.
    fn on_response(&self, _target: &str, _status: StatusCode, _elapsed: Duration) {}

    /// When no upstream response could be obtained.
    fn on_failure(&self, _target: &str, _error: &UpstreamError, _elapsed: Duration) {}
}

/// Observer that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RelayObserver for NoopObserver {}

/// Emits `tracing` events and `metrics` samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryObserver;

impl RelayObserver for TelemetryObserver {
    fn on_dispatch(&self, target: &str) {
        tracing::info!(target_url = %target, "Proxying request");
    }

    fn on_response(&self, target: &str, status: StatusCode, elapsed: Duration) {
        tracing::info!(
            target_url = %target,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Received upstream response"
        );
        metrics::record_response(status.as_u16(), elapsed);
    }

    fn on_failure(&self, target: &str, error: &UpstreamError, elapsed: Duration) {
        tracing::error!(
            target_url = %target,
            error = %error,
            elapsed_ms = elapsed.as_millis() as u64,
            "Upstream request failed"
        );
        metrics::record_failure(elapsed);
    }
}
