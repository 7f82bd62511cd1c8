//! Configuration validation.
//!
//! Semantic checks run after serde has accepted the document. Every
//! problem is reported, not just the first; each field contributes at
//! most one error.

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream.origin `{origin}` is not a valid URL: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("upstream.origin `{0}` must use http or https")]
    UnsupportedScheme(String),

    #[error("upstream.origin `{0}` must be a bare scheme://host[:port] with no trailing slash")]
    NotBareOrigin(String),

    #[error("observability.log_level `{0}` is not a valid filter directive")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(err) = check_origin(&config.upstream.origin) {
        errors.push(err);
    }

    let observability = &config.observability;
    if EnvFilter::try_new(&observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            observability.log_level.clone(),
        ));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The origin is concatenated with raw request paths, so anything past the
/// authority would corrupt the target URL.
fn check_origin(origin: &str) -> Option<ValidationError> {
    let url = match Url::parse(origin) {
        Ok(url) => url,
        Err(e) => {
            return Some(ValidationError::InvalidOrigin {
                origin: origin.to_string(),
                reason: e.to_string(),
            })
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        return Some(ValidationError::UnsupportedScheme(origin.to_string()));
    }

    if url.path() != "/"
        || url.query().is_some()
        || url.fragment().is_some()
        || origin.ends_with('/')
    {
        return Some(ValidationError::NotBareOrigin(origin.to_string()));
    }

    None
}
