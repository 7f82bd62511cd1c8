//! Request identification.
//!
//! # Responsibilities
//! - Assign a UUID `x-request-id` to inbound requests that lack one
//! - Open the per-request tracing span carrying that ID
//!
//! # Design Decisions
//! - The ID lives on the inbound request only; it is not sent upstream
//!   and not added to the relayed response

use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tracing::Span;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer that fills in a missing `x-request-id`.
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Span for one inbound request, used by the trace layer.
pub fn request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Response;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceBuilder, ServiceExt};

    async fn seen_request_id(request: Request<()>) -> String {
        let svc = ServiceBuilder::new()
            .layer(request_id_layer())
            .service(service_fn(|req: Request<()>| async move {
                let id = req
                    .headers()
                    .get(&X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Ok::<_, Infallible>(Response::new(id))
            }));

        svc.oneshot(request).await.unwrap().into_body()
    }

    #[tokio::test]
    async fn test_missing_id_is_generated() {
        let id = seen_request_id(Request::new(())).await;
        assert_eq!(id.len(), 36, "expected a hyphenated UUID, got {id:?}");
    }

    #[tokio::test]
    async fn test_existing_id_is_kept() {
        let request = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(())
            .unwrap();
        assert_eq!(seen_request_id(request).await, "abc-123");
    }
}
