//! Account route handlers.
//!
//! The account page, name/password changes and account deletion.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb, clear_sentry_user};
use crate::filters;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

use super::{Flash, MessageQuery};

/// Edit-profile form data.
///
/// Leaving both password fields blank keeps the current password.
#[derive(Debug, Deserialize)]
pub struct EditProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub user: User,
}

/// Edit-profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "edit-profile.html")]
pub struct EditProfileTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub user: User,
}

/// Load the session user's row, ending the session if it is gone.
async fn load_user(
    state: &AppState,
    session: &Session,
    current: &CurrentUser,
) -> Result<User, Response> {
    match AuthService::new(state.pool()).get_user(current.id).await {
        Ok(user) => Ok(user),
        Err(AuthError::UserNotFound) => {
            tracing::warn!(user_id = %current.id, "Session user no longer exists");
            if let Err(e) = clear_current_user(session).await {
                tracing::error!("Failed to clear session: {}", e);
            }
            Err(Redirect::to("/login").into_response())
        }
        Err(e) => Err(AppError::from(e).into_response()),
    }
}

/// Display the account page.
#[instrument(skip_all, fields(user_id = %current.id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    match load_user(&state, &session, &current).await {
        Ok(user) => ProfileTemplate {
            current_user: Some(current),
            flash: Flash::from_query(&query),
            user,
        }
        .into_response(),
        Err(response) => response,
    }
}

/// Display the edit-profile form.
#[instrument(skip_all, fields(user_id = %current.id))]
pub async fn edit_page(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    match load_user(&state, &session, &current).await {
        Ok(user) => EditProfileTemplate {
            current_user: Some(current),
            flash: Flash::from_query(&query),
            user,
        }
        .into_response(),
        Err(response) => response,
    }
}

/// Handle the edit-profile form.
#[instrument(skip_all, fields(user_id = %current.id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
    Form(form): Form<EditProfileForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    let user = match auth
        .update_account(current.id, &form.name, &form.password, &form.confirm_password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            let code = match &e {
                AuthError::MissingField(_) => "name_required",
                AuthError::WeakPassword(_) => "password_too_short",
                AuthError::PasswordMismatch => "password_mismatch",
                AuthError::UserNotFound => return Redirect::to("/login").into_response(),
                _ => {
                    tracing::error!(error = %e, "Profile update failed");
                    "update_failed"
                }
            };
            return Redirect::to(&format!("/profile/edit?error={code}")).into_response();
        }
    };

    // Keep the navigation greeting in step with the new name.
    if let Err(e) = set_current_user(&session, &CurrentUser::from(&user)).await {
        tracing::error!("Failed to refresh session: {}", e);
    }

    tracing::info!(user_id = %user.id, "Profile updated");
    Redirect::to("/profile?success=profile_updated").into_response()
}

/// Delete the account, its styling profile, wardrobe and photos.
#[instrument(skip_all, fields(user_id = %current.id))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(current): RequireAuth,
) -> Response {
    let image_urls = match AuthService::new(state.pool()).delete_account(current.id).await {
        Ok(urls) => urls,
        Err(AuthError::UserNotFound) => Vec::new(),
        Err(e) => {
            tracing::error!(error = %e, "Account deletion failed");
            return Redirect::to("/profile?error=delete_account_failed").into_response();
        }
    };

    for url in &image_urls {
        state.images().remove(url).await;
    }

    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();
    add_breadcrumb("auth", "Account deleted", &[]);

    tracing::info!(user_id = %current.id, photos = image_urls.len(), "Account deleted");
    Redirect::to("/login?success=account_deleted").into_response()
}
