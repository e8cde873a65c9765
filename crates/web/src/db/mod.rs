//! Database operations for GlamDiva `PostgreSQL`.
//!
//! # Schema: `glamdiva`
//!
//! ## Tables
//!
//! - `user` - Accounts (name, unique email, Argon2 password hash)
//! - `user_profile` - One row of styling attributes per user
//! - `wardrobe_item` - Clothing items, newest first
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! Deleting a user cascades to their profile and wardrobe.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p glamdiva-cli -- migrate
//! ```

pub mod profiles;
pub mod users;
pub mod wardrobe;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use profiles::ProfileRepository;
pub use users::UserRepository;
pub use wardrobe::{WardrobeFilter, WardrobeRepository, WardrobeSort};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to `Conflict`, anything else to `Database`.
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Turn a search term into an `ILIKE` pattern matching it as a substring.
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_wraps_term() {
        assert_eq!(contains_pattern("navy"), "%navy%");
        assert_eq!(contains_pattern("light blue"), "%light blue%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("t_shirt"), r"%t\_shirt%");
        assert_eq!(contains_pattern("100%"), r"%100\%%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn test_conflict_message() {
        let err = RepositoryError::Conflict("email already exists".to_owned());
        assert_eq!(err.to_string(), "constraint violation: email already exists");
    }
}
