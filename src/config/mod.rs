//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → ConfigOverrides (CLI / environment, applied in loader.rs)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError, ConfigOverrides};
pub use schema::{
    LogFormat, ListenerConfig, ObservabilityConfig, RelayConfig, UpstreamConfig,
    DEFAULT_UPSTREAM_ORIGIN,
};
pub use validation::{validate_config, ValidationError};
