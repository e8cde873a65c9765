//! Authentication route handlers.
//!
//! Signup, login, logout and the demo-user shortcut.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

use super::{Flash, MessageQuery};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after logging in (hidden field).
    pub next: Option<String>,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameter carrying the post-login destination.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    /// Validated destination, echoed into the form.
    pub next: Option<String>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Accept only same-site relative paths as a post-login destination.
fn safe_next(next: Option<&str>) -> Option<&str> {
    let next = next?.trim();
    let local = next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(char::is_control);
    local.then_some(next)
}

/// `/login?error=<code>`, keeping a valid `next`.
fn login_error(code: &str, next: Option<&str>) -> Response {
    let url = match safe_next(next) {
        Some(next) => format!("/login?error={code}&next={}", urlencoding::encode(next)),
        None => format!("/login?error={code}"),
    };
    Redirect::to(&url).into_response()
}

/// Put a user in the session and tag Sentry events with them.
async fn start_session(session: &Session, user: &User) -> Result<(), tower_sessions::session::Error> {
    set_current_user(session, &CurrentUser::from(user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    add_breadcrumb("auth", "Logged in", &[("user_id", &user.id.to_string())]);
    Ok(())
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(
    OptionalAuth(current_user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    SignupTemplate {
        current_user,
        flash: Flash::from_query(&query),
    }
}

/// Handle signup form submission.
///
/// On success the user is sent to the login page; signing up doesn't log in.
pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.register(&form.name, &form.email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User registered");
            Redirect::to("/login?success=registered").into_response()
        }
        Err(e) => {
            let code = match &e {
                AuthError::MissingField(_) => "missing_fields",
                AuthError::WeakPassword(_) => "password_too_short",
                AuthError::InvalidEmail(_) => "invalid_email",
                AuthError::UserAlreadyExists => "email_taken",
                _ => {
                    tracing::error!(error = %e, "Registration failed");
                    "signup_failed"
                }
            };
            Redirect::to(&format!("/signup?error={code}")).into_response()
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(current_user): OptionalAuth,
    Query(query): Query<MessageQuery>,
    Query(next): Query<NextQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        current_user,
        flash: Flash::from_query(&query),
        next: safe_next(next.next.as_deref()).map(str::to_owned),
    }
}

/// Handle login form submission.
///
/// Redirects to `next` when it is a local path, otherwise home.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());
    let next = form.next.as_deref();

    let user = match auth.login(&form.email, &form.password).await {
        Ok(user) => user,
        Err(AuthError::MissingField(_)) => return login_error("login_missing", next),
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            return login_error("credentials", next);
        }
        Err(e) => return AppError::from(e).into_response(),
    };

    if let Err(e) = start_session(&session, &user).await {
        tracing::error!("Failed to set session: {}", e);
        return login_error("session", next);
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let destination = safe_next(next).map_or_else(|| "/?success=welcome".to_owned(), str::to_owned);
    Redirect::to(&destination).into_response()
}

/// Handle logout.
pub async fn logout(OptionalAuth(current_user): OptionalAuth, session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();

    if let Some(user) = current_user {
        tracing::info!(user_id = %user.id, "User logged out");
    }

    Redirect::to("/login?success=logged_out").into_response()
}

/// Log in as the seeded demo user.
///
/// Only routed to a user when `GLAMDIVA_DEV_LOGIN` is on; 404 otherwise.
pub async fn dev_login(State(state): State<AppState>, session: Session) -> Response {
    if !state.config().dev_login {
        return StatusCode::NOT_FOUND.into_response();
    }

    let user = match AuthService::new(state.pool()).demo_user().await {
        Ok(user) => user,
        Err(AuthError::UserNotFound) => {
            return AppError::NotFound(
                "Demo user not found. Run `glamdiva-cli seed demo-user` first.".to_owned(),
            )
            .into_response();
        }
        Err(e) => return AppError::from(e).into_response(),
    };

    if let Err(e) = start_session(&session, &user).await {
        tracing::error!("Failed to set session: {}", e);
        return AppError::Internal("session".to_owned()).into_response();
    }

    tracing::info!(user_id = %user.id, "Demo user logged in");
    Redirect::to("/").into_response()
}
