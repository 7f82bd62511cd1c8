//! The relay handler.

use std::sync::Arc;
use std::time::Instant;

use axum::response::Response;

use crate::http::response::{proxy_failure, relay_upstream};
use crate::observability::{NoopObserver, RelayObserver};
use crate::relay::target::build_target;
use crate::relay::upstream::Upstream;

/// Forwards request paths to one fixed origin.
///
/// Holds no per-request state; clones share the client and observer.
#[derive(Clone)]
pub struct Relay {
    origin: Arc<str>,
    upstream: Arc<dyn Upstream>,
    observer: Arc<dyn RelayObserver>,
}

impl Relay {
    /// Create a relay with a no-op observer.
    pub fn new(origin: impl Into<Arc<str>>, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            origin: origin.into(),
            upstream,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RelayObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The URL a request for `path` is forwarded to.
    pub fn target_for(&self, path: &str) -> String {
        build_target(&self.origin, path)
    }

    /// GET `origin + path` and relay whatever comes back.
    pub async fn handle(&self, path: &str) -> Response {
        let target = self.target_for(path);
        let started = Instant::now();

        self.observer.on_dispatch(&target);

        match self.upstream.fetch(&target).await {
            Ok(upstream) => {
                self.observer
                    .on_response(&target, upstream.status, started.elapsed());
                relay_upstream(upstream)
            }
            Err(err) => {
                self.observer.on_failure(&target, &err, started.elapsed());
                proxy_failure()
            }
        }
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
