//! Upstream client seam.
//!
//! `Upstream` is the only place the relay touches the network. The
//! production implementation wraps `reqwest`; tests substitute doubles.

use axum::body::Bytes;
use axum::http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use futures_util::future::BoxFuture;
use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use thiserror::Error;

/// Upstream body, read once. Dropping it releases the connection.
pub type BodyStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// A response head plus its unread body.
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// `None` when the upstream did not declare a length.
    pub content_length: Option<u64>,
    pub content_type: Option<HeaderValue>,
    pub body: BodyStream,
}

impl std::fmt::Debug for UpstreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Failure to obtain any response from the upstream.
///
/// DNS, connect, TLS and URL errors all collapse into this one kind.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request to {target} failed: {source}")]
    Unreachable {
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl UpstreamError {
    pub fn unreachable(
        target: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        UpstreamError::Unreachable {
            target: target.into(),
            source: source.into(),
        }
    }
}

/// Issues the upstream GET.
pub trait Upstream: Send + Sync + 'static {
    fn fetch<'a>(
        &'a self,
        target: &'a str,
    ) -> BoxFuture<'a, Result<UpstreamResponse, UpstreamError>>;
}

/// `reqwest`-backed upstream.
///
/// Uses the client defaults: no timeout, the default connection pool, and
/// no request headers beyond what `reqwest` itself sends.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(reqwest::Client::builder().build()?))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Upstream for HttpUpstream {
    fn fetch<'a>(
        &'a self,
        target: &'a str,
    ) -> BoxFuture<'a, Result<UpstreamResponse, UpstreamError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(target)
                .send()
                .await
                .map_err(|e| UpstreamError::unreachable(target, e))?;

            Ok(UpstreamResponse {
                status: response.status(),
                content_length: response.content_length(),
                content_type: response.headers().get(CONTENT_TYPE).cloned(),
                body: response
                    .bytes_stream()
                    .map_err(std::io::Error::other)
                    .boxed(),
            })
        })
    }
}
