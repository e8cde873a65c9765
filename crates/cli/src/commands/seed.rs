//! Development data.

use glamdiva_core::{Email, UserId};
use glamdiva_web::db::UserRepository;
use glamdiva_web::services::auth::{AuthError, DEMO_USER_EMAIL, hash_password};

use super::{CommandError, connect};

/// Display name of the demo account.
pub const DEMO_USER_NAME: &str = "Demo User";

/// Password of the demo account. Development only.
pub const DEMO_USER_PASSWORD: &str = "demo123";

/// Create the demo account if it doesn't already exist.
///
/// Returns the account's ID either way.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the insert fails.
pub async fn demo_user() -> Result<UserId, CommandError> {
    let pool = connect().await?;
    let users = UserRepository::new(&pool);
    let email = Email::parse(DEMO_USER_EMAIL).map_err(AuthError::from)?;

    if let Some(existing) = users.get_by_email(&email).await? {
        tracing::info!(user_id = %existing.id, "Demo user already exists, nothing to do");
        return Ok(existing.id);
    }

    let password_hash = hash_password(DEMO_USER_PASSWORD)?;
    let user = users
        .create_with_password(DEMO_USER_NAME, &email, &password_hash)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Demo user created");
    tracing::info!("  Log in at /dev-login (GLAMDIVA_DEV_LOGIN=true) or with {DEMO_USER_EMAIL} / {DEMO_USER_PASSWORD}");

    Ok(user.id)
}
