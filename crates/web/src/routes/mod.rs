//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home (requires auth)
//!
//! # Auth
//! GET  /signup                  - Signup page
//! POST /signup                  - Create account
//! GET  /login                   - Login page (honours ?next=)
//! POST /login                   - Login action
//! POST /logout                  - Logout action
//! GET  /dev-login               - Sign in as the demo user (GLAMDIVA_DEV_LOGIN only)
//!
//! # Account (requires auth)
//! GET  /profile                 - Account overview
//! GET  /profile/edit            - Edit name / password
//! POST /profile/edit            - Save name / password
//! POST /profile/delete          - Delete account, profile and wardrobe
//!
//! # Wardrobe (requires auth)
//! GET  /wardrobe                - List (?q=, ?category=, ?sort=newest|name)
//! POST /wardrobe                - Add item (multipart, optional photo)
//! POST /wardrobe/delete/{id}    - Delete own item
//!
//! # Styling (requires auth)
//! GET  /personal-styler         - Suggestions, palette and wardrobe picks
//! POST /personal-styler         - Save styling attributes
//! GET  /colour-analysis         - Season, palette and in-season items
//! ```
//!
//! Form handlers redirect with `?error=<code>` or `?success=<code>`; pages
//! turn the code into text with [`Flash::from_query`].

pub mod auth;
pub mod colour_analysis;
pub mod home;
pub mod profile;
pub mod styler;
pub mod wardrobe;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use serde::Deserialize;

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

// =============================================================================
// Messages
// =============================================================================

/// Query parameters carrying a message code after a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// How a message is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Success,
}

impl FlashKind {
    /// CSS modifier class.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Error => "flash-error",
            Self::Success => "flash-success",
        }
    }
}

/// A one-off message shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: &'static str,
}

impl Flash {
    /// Resolve the message codes in a query.
    ///
    /// Errors win over successes. Unknown codes are dropped rather than
    /// echoed back into the page.
    #[must_use]
    pub fn from_query(query: &MessageQuery) -> Option<Self> {
        let error = query.error.as_deref().and_then(error_text).map(|text| Self {
            kind: FlashKind::Error,
            text,
        });

        error.or_else(|| {
            query
                .success
                .as_deref()
                .and_then(success_text)
                .map(|text| Self {
                    kind: FlashKind::Success,
                    text,
                })
        })
    }
}

fn error_text(code: &str) -> Option<&'static str> {
    Some(match code {
        "missing_fields" => "All fields are required!",
        "password_too_short" => "Password must be at least 6 characters long!",
        "invalid_email" => "Please enter a valid email address.",
        "email_taken" => "Email already registered! Please login.",
        "signup_failed" => "Registration failed. Please try again.",
        "login_missing" => "Email and password are required!",
        "credentials" => "Invalid email or password!",
        "session" => "Could not start your session. Please try again.",
        "name_required" => "Name cannot be empty.",
        "password_mismatch" => "Passwords do not match.",
        "update_failed" => "Failed to update profile. Please try again.",
        "delete_account_failed" => "Failed to delete your account. Please try again.",
        "item_required" => "Name and category are required.",
        "item_too_long" => "One of the fields is too long.",
        "unsupported_image" => "Unsupported image format. Allowed: png, jpg, jpeg, gif, webp.",
        "upload_too_large" => "That image is too large.",
        "bad_upload" => "The upload could not be read. Please try again.",
        "add_failed" => "Failed to add item. Please try again.",
        "item_not_found" => "Item not found or not authorized.",
        "delete_failed" => "Failed to delete item.",
        "invalid_undertone" => "Undertone must be one of cool, warm, neutral.",
        "invalid_occasion" => "Occasion is invalid.",
        "attribute_too_long" => "Skin tone, eye colour and hair colour must be 50 characters or fewer.",
        "save_failed" => "Failed to save preferences.",
        _ => return None,
    })
}

fn success_text(code: &str) -> Option<&'static str> {
    Some(match code {
        "registered" => "Registration successful! Please login.",
        "welcome" => "Welcome back!",
        "logged_out" => "You have been logged out.",
        "profile_updated" => "Profile updated successfully.",
        "account_deleted" => "Your account has been deleted.",
        "item_added" => "Item added to wardrobe.",
        "item_deleted" => "Item deleted.",
        "preferences_saved" => "Personal Styler preferences saved.",
        _ => return None,
    })
}

/// Turn an optional form field into a trimmed value, blank meaning absent.
#[must_use]
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Routers
// =============================================================================

/// Login and signup form posts, rate limited per client IP.
fn auth_form_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .layer(auth_rate_limiter())
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page))
        .route("/signup", get(auth::signup_page))
        .route("/logout", post(auth::logout))
        .route("/dev-login", get(auth::dev_login))
        .merge(auth_form_routes())
}

/// Create the account routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/edit", get(profile::edit_page).post(profile::update))
        .route("/delete", post(profile::delete))
}

/// Create the wardrobe routes router.
///
/// The add form accepts bodies up to `max_upload_bytes`.
pub fn wardrobe_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(wardrobe::index)
                .post(wardrobe::create)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/delete/{id}", post(wardrobe::delete))
}

/// Create all page routes.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .nest("/profile", profile_routes())
        .nest("/wardrobe", wardrobe_routes(max_upload_bytes))
        .route(
            "/personal-styler",
            get(styler::show).post(styler::save),
        )
        .route("/colour-analysis", get(colour_analysis::show))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(error: Option<&str>, success: Option<&str>) -> MessageQuery {
        MessageQuery {
            error: error.map(str::to_owned),
            success: success.map(str::to_owned),
        }
    }

    #[test]
    fn test_known_codes_resolve() {
        let flash = Flash::from_query(&query(Some("credentials"), None)).unwrap_or_else(|| {
            panic!("credentials should resolve");
        });
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.text, "Invalid email or password!");

        let flash = Flash::from_query(&query(None, Some("item_added")));
        assert_eq!(
            flash,
            Some(Flash {
                kind: FlashKind::Success,
                text: "Item added to wardrobe."
            })
        );
    }

    #[test]
    fn test_attribute_length_code_resolves() {
        let flash = Flash::from_query(&query(Some("attribute_too_long"), None));
        assert_eq!(flash.map(|f| f.kind), Some(FlashKind::Error));
    }

    #[test]
    fn test_error_wins_over_success() {
        let flash = Flash::from_query(&query(Some("delete_failed"), Some("item_deleted")));
        assert_eq!(flash.map(|f| f.kind), Some(FlashKind::Error));
    }

    #[test]
    fn test_unknown_codes_are_not_echoed() {
        assert_eq!(
            Flash::from_query(&query(Some("<script>alert(1)</script>"), None)),
            None
        );
        assert_eq!(Flash::from_query(&MessageQuery::default()), None);
        // An unknown error code doesn't hide a known success.
        assert!(Flash::from_query(&query(Some("nope"), Some("welcome"))).is_some());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  navy ".to_owned())).as_deref(), Some("navy"));
        assert_eq!(non_blank(Some("   ".to_owned())), None);
        assert_eq!(non_blank(None), None);
    }
}
