//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, every path and method)
//!     → request.rs (request ID, tracing span)
//!     → relay handler (crate::relay)
//!     → response.rs (relay upstream or fixed failure)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, HttpServerError};
