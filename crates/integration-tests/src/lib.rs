//! Integration tests for GlamDiva.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database and start the server
//! cargo run -p glamdiva-cli -- migrate
//! cargo run -p glamdiva-web
//!
//! # Run the ignored tests against it
//! cargo test -p glamdiva-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `GLAMDIVA_TEST_BASE_URL` - Server under test (default: `http://localhost:5000`)
//! - `GLAMDIVA_DATABASE_URL` - Database for the store-level tests
//!
//! # Test Categories
//!
//! - `auth_flow` - signup, login, `next` redirects, logout, account deletion
//! - `wardrobe_flow` - adding, listing, filtering and deleting items
//! - `styling_flow` - styler validation, suggestions and colour analysis
//! - `wardrobe_store` - repository queries against Postgres directly

use reqwest::header::{HeaderMap, HeaderValue, LOCATION};
use reqwest::{Client, StatusCode, redirect::Policy};
use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

/// Password used for every account the tests create.
pub const TEST_PASSWORD: &str = "wardrobe-test-1";

/// Base URL of the running server.
#[must_use]
pub fn base_url() -> String {
    std::env::var("GLAMDIVA_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Absolute URL for a path on the server under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url().trim_end_matches('/'))
}

/// A cookie-keeping client that does not follow redirects, so tests can
/// assert on `Location`.
///
/// Each client claims its own `X-Forwarded-For` address so the login rate
/// limiter treats parallel tests as separate visitors.
///
/// # Panics
///
/// Panics if the client can't be built.
#[must_use]
pub fn client() -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-forwarded-for",
        HeaderValue::from_str(&test_client_ip()).expect("valid header value"),
    );

    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .default_headers(headers)
        .build()
        .expect("Failed to create HTTP client")
}

/// A random address from the 10.0.0.0/8 private range.
fn test_client_ip() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    format!("10.{}.{}.{}", bytes[0], bytes[1], bytes[2])
}

/// An email address no other test run has used.
#[must_use]
pub fn unique_email() -> String {
    format!("it-{}@glamdiva.test", Uuid::new_v4().simple())
}

/// The `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the response isn't a 303 with a location.
#[must_use]
pub fn location(response: &reqwest::Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "expected a redirect");
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect without Location")
        .to_owned()
}

/// Sign up a fresh account and log the client in as it.
///
/// Returns the account's email.
///
/// # Panics
///
/// Panics if either step doesn't redirect where expected.
pub async fn signed_in_client(name: &str) -> (Client, String) {
    let client = client();
    let email = unique_email();

    let resp = client
        .post(url("/signup"))
        .form(&[("name", name), ("email", &email), ("password", TEST_PASSWORD)])
        .send()
        .await
        .expect("signup request failed");
    assert_eq!(location(&resp), "/login?success=registered");

    let resp = client
        .post(url("/login"))
        .form(&[("email", email.as_str()), ("password", TEST_PASSWORD)])
        .send()
        .await
        .expect("login request failed");
    assert_eq!(location(&resp), "/?success=welcome");

    (client, email)
}

/// Connect to the database named by `GLAMDIVA_DATABASE_URL` (or `DATABASE_URL`).
///
/// # Panics
///
/// Panics if neither variable is set or the connection fails.
pub async fn test_pool() -> PgPool {
    let database_url = std::env::var("GLAMDIVA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .expect("GLAMDIVA_DATABASE_URL not set");

    glamdiva_web::db::create_pool(&database_url)
        .await
        .expect("Failed to connect to test database")
}
