//! Request ID middleware for correlating logs, Sentry events and responses.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID we'll trust.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Give every request an ID.
///
/// An `x-request-id` from an upstream proxy is reused when it is short and
/// printable; otherwise a UUID v4 is generated. The ID is recorded on the
/// `request_id` field of the current span, tagged on the Sentry scope, and
/// echoed back in the response headers.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(upstream_id)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn upstream_id(raw: &str) -> Option<&str> {
    let id = raw.trim();
    let usable = !id.is_empty()
        && id.len() <= MAX_UPSTREAM_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic());
    usable.then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_accepts_reasonable_values() {
        assert_eq!(upstream_id(" abc-123 "), Some("abc-123"));
        assert_eq!(upstream_id(""), None);
        assert_eq!(upstream_id("has space"), None);
        assert_eq!(upstream_id(&"x".repeat(MAX_UPSTREAM_ID_LEN + 1)), None);
    }
}
