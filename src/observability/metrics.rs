//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): upstream responses by status
//! - `relay_upstream_failures_total` (counter): transport failures
//! - `relay_upstream_duration_seconds` (histogram): time to response head

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_response(status: u16, elapsed: Duration) {
    counter!("relay_requests_total", "status" => status.to_string()).increment(1);
    histogram!("relay_upstream_duration_seconds", "outcome" => "response")
        .record(elapsed.as_secs_f64());
}

pub fn record_failure(elapsed: Duration) {
    counter!("relay_upstream_failures_total").increment(1);
    histogram!("relay_upstream_duration_seconds", "outcome" => "failure")
        .record(elapsed.as_secs_f64());
}
