//! Request tracing middleware.
//!
//! Tags every request with an id, runs it inside a span carrying that id and
//! logs one completion line per request.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied request id that is reused as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request ID stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Reuses a sane incoming id, otherwise generates a UUID v4.
fn resolve_request_id(incoming: Option<&HeaderValue>) -> String {
    incoming
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Middleware that extracts or generates a request ID.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = resolve_request_id(req.headers().get(REQUEST_ID_HEADER));
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let start = std::time::Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;
    let duration_ms = start.elapsed().as_millis();
    let status = response.status();

    span.in_scope(|| {
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), duration_ms, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), duration_ms, "Request completed");
        }
    });

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Extension, Router};
    use tower::ServiceExt;

    #[test]
    fn test_resolve_request_id_reuses_incoming() {
        let value = HeaderValue::from_static("req-123_abc.xyz");
        assert_eq!(resolve_request_id(Some(&value)), "req-123_abc.xyz");
    }

    #[test]
    fn test_resolve_request_id_generates_when_missing() {
        let id = resolve_request_id(None);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_resolve_request_id_replaces_blank_and_oversized() {
        let blank = HeaderValue::from_static("   ");
        assert!(Uuid::parse_str(&resolve_request_id(Some(&blank))).is_ok());

        let long = HeaderValue::from_str(&"r".repeat(MAX_REQUEST_ID_LEN + 1)).unwrap();
        assert!(Uuid::parse_str(&resolve_request_id(Some(&long))).is_ok());
    }

    #[tokio::test]
    async fn test_middleware_echoes_header_and_sets_extension() {
        let app = Router::new()
            .route(
                "/",
                get(|Extension(id): Extension<RequestId>| async move { id.0 }),
            )
            .layer(axum::middleware::from_fn(trace_id));

        let request = Request::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, "abc-1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-1");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"abc-1");
    }
}
