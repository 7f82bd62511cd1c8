//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! relay handler
//!     → hooks.rs (RelayObserver: dispatch / response / failure)
//!         → tracing events (logging.rs subscriber)
//!         → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Relay logic never logs directly; it calls observer hooks
//! - Recording metrics without an installed exporter is a no-op
//! - Request ID is attached to the request span, not to log calls

pub mod hooks;
pub mod logging;
pub mod metrics;

pub use hooks::{NoopObserver, RelayObserver, TelemetryObserver};
