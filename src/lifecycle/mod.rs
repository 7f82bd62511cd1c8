//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → metrics exporter → bind listener → HttpServer
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → HttpServer::run stops accepting
//!     → in-flight relays finish → exit
//! ```

pub mod signals;
pub mod startup;

pub use startup::{start, StartupError};
