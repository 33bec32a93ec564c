//! Request id propagation.
//!
//! Every request runs inside a `request` span carrying its id, method and path,
//! so anything logged by handlers (including internal errors) can be correlated.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Longest client supplied id that is accepted as is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request ID stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Reuse a sane client supplied id, otherwise generate a UUID v4.
fn resolve_request_id(supplied: Option<&str>) -> String {
    match supplied {
        Some(id) if !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Middleware that extracts or generates a request ID.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = resolve_request_id(
        req.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );

    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let start = std::time::Instant::now();
        let mut response = next.run(req).await;

        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        if let Ok(header_value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static("x-request-id"), header_value);
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplied_id_is_kept() {
        assert_eq!(resolve_request_id(Some("req-123_abc")), "req-123_abc");
    }

    #[test]
    fn test_missing_id_is_generated() {
        let id = resolve_request_id(None);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_empty_or_oversized_id_is_replaced() {
        assert!(Uuid::parse_str(&resolve_request_id(Some(""))).is_ok());
        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        assert!(Uuid::parse_str(&resolve_request_id(Some(&long))).is_ok());
    }
}
