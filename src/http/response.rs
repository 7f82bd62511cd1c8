//! Response construction for the client.
//!
//! # Responsibilities
//! - Relay an upstream response: status, content type, content length, body
//! - Produce the fixed failure response when no upstream response exists
//!
//! # Design Decisions
//! - The body is streamed, never buffered
//! - No headers beyond content type and length are copied
//! - A missing upstream content type is sent as an empty value
//! - A missing upstream length leaves framing to hyper (chunked)

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::relay::UpstreamResponse;

/// Message carried in the failure body.
pub const PROXY_FAILURE_MESSAGE: &str = "Proxy request failed";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// `500` with `{"error": "Proxy request failed"}`.
pub fn proxy_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: PROXY_FAILURE_MESSAGE,
        }),
    )
        .into_response()
}

/// Move an upstream response into a client response.
pub fn relay_upstream(upstream: UpstreamResponse) -> Response {
    let UpstreamResponse {
        status,
        content_length,
        content_type,
        body,
    } = upstream;

    let mut response = Response::new(Body::from_stream(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("")),
    );
    if let Some(len) = content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    }

    response
}
