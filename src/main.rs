//! upstream-relay
//!
//! Forwards every inbound request path to one fixed upstream origin with a
//! GET and streams the upstream response back unchanged.
//!
//! ```text
//!     Client                 ┌──────────────────────────────────────┐
//!     ──── any method ──────▶│ http server → relay → upstream GET   │────▶ origin + path
//!     ◀─── same status, ─────│             ◀─ status, type, length, │◀────
//!          type, body        │                streamed body         │
//!                            └──────────────────────────────────────┘
//!     transport failure: 500 {"error": "Proxy request failed"}
//! ```

use std::path::PathBuf;

use clap::Parser;

use upstream_relay::config::{load_config, ConfigError, ConfigOverrides, RelayConfig};
use upstream_relay::lifecycle::{self, signals};
use upstream_relay::observability::logging;

#[derive(Parser)]
#[command(name = "upstream-relay")]
#[command(about = "Relay every request path to a fixed upstream origin", long_about = None)]
struct Cli {
    /// TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long, env = "RELAY_BIND")]
    bind: Option<String>,

    /// Override upstream.origin.
    #[arg(long, env = "RELAY_UPSTREAM_ORIGIN")]
    upstream: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<RelayConfig, ConfigError> {
        let overrides = ConfigOverrides {
            bind_address: self.bind,
            upstream_origin: self.upstream,
        };
        load_config(self.config.as_deref(), &overrides)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let (server, listener) = lifecycle::start(config).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, signals::wait_for_termination()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
