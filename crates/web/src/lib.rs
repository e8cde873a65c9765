//! GlamDiva web library.
//!
//! The wardrobe and styling site as a library, so the binary, the CLI and
//! tests share one set of stores, services and routes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, extract::State, http::StatusCode, middleware::from_fn, routing::get};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::state::AppState;

/// Directory the stylesheet and other static assets are served from.
pub const STATIC_DIR: &str = "crates/web/static";

/// Build the full application router.
///
/// Layers, outermost first: trace span, request ID, security headers,
/// session. Sentry layers are added by the binary on top of this.
pub fn build_router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.pool(), state.config());
    let uploads = ServeDir::new(state.config().upload_dir.clone());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes(state.config().max_upload_bytes))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .nest_service("/uploads", uploads)
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::tests::test_config;

    /// A router whose pool never connects. Only requests that stop before
    /// touching the database can be exercised.
    fn offline_router(dev_login: bool) -> Router {
        let mut config = test_config();
        config.dev_login = dev_login;
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://glamdiva@localhost:1/glamdiva")
            .unwrap();
        build_router(AppState::new(config, pool))
    }

    async fn get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_and_security_headers() {
        let response = get(offline_router(false), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_protected_pages_redirect_to_login() {
        for (uri, location) in [
            ("/", "/login"),
            ("/wardrobe?sort=name", "/login?next=%2Fwardrobe%3Fsort%3Dname"),
            ("/personal-styler", "/login?next=%2Fpersonal-styler"),
            ("/colour-analysis", "/login?next=%2Fcolour-analysis"),
            ("/profile", "/login?next=%2Fprofile"),
        ] {
            let response = get(offline_router(false), uri).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(response.headers()[header::LOCATION], location, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_login_page_renders_message_and_next() {
        let response = get(
            offline_router(false),
            "/login?error=credentials&next=%2Fwardrobe",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Invalid email or password!"));
        assert!(html.contains(r#"name="next" value="/wardrobe""#));
    }

    #[tokio::test]
    async fn test_dev_login_hidden_when_disabled() {
        let response = get(offline_router(false), "/dev-login").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_signup_validation_happens_before_the_database() {
        let response = offline_router(false)
            .oneshot(
                Request::post("/signup")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header("x-forwarded-for", "203.0.113.7")
                    .body(Body::from("name=Ann&email=ann%40example.com&password=abc"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/signup?error=password_too_short"
        );
    }
}
