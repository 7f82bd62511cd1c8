//! Upstream relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound path
//!     → target.rs (origin + path, no normalization)
//!     → upstream.rs (single GET, no retry)
//!     → http/response.rs (status, content type, length, streamed body)
//!
//! on transport failure:
//!     → http/response.rs (fixed 500 JSON body)
//! ```
//!
//! # Design Decisions
//! - The origin is injected, never a literal in the handler
//! - Any HTTP response is a success; only transport failure is an error
//! - The upstream body is owned by the outbound response body and released
//!   when that body is dropped
//! - Observation happens through `RelayObserver`, not inline logging

pub mod handler;
pub mod target;
pub mod upstream;

pub use handler::Relay;
pub use target::build_target;
pub use upstream::{BodyStream, HttpUpstream, Upstream, UpstreamError, UpstreamResponse};
