//! User domain types.

use chrono::{DateTime, Utc};

use glamdiva_core::{Email, UserId};

/// A registered GlamDiva user.
///
/// The password hash is read separately through [`UserRepository::get_password_hash`](crate::db::UserRepository::get_password_hash).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, normalized.
    pub email: Email,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
    /// When the name or password last changed.
    pub updated_at: DateTime<Utc>,
}
