//! Authentication service.
//!
//! Email and password accounts with Argon2id hashes.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use glamdiva_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Email of the account `/dev-login` signs in as.
pub const DEMO_USER_EMAIL: &str = "demo@glamdiva.dev";

/// Authentication service.
///
/// Handles registration, login and account changes.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// The name is trimmed and the email normalized before storing.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the name, email or password is blank.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = required("name", name)?;
        required("email", email)?;
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        validate_password(password)?;
        let email = Email::parse(email)?;
        let password_hash = hash_password(password)?;

        self.users
            .create_with_password(name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        required("email", email)?;
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        // A malformed address can't belong to an account.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Look up the seeded demo account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if it hasn't been seeded.
    pub async fn demo_user(&self) -> Result<User, AuthError> {
        let email = Email::parse(DEMO_USER_EMAIL)?;
        self.users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Apply the edit-profile form: a new name and, optionally, a new password.
    ///
    /// The password is only changed when either password field is filled in.
    /// Validation happens before anything is written.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the name is blank.
    /// Returns `AuthError::WeakPassword` or `AuthError::PasswordMismatch` for a
    /// bad password change.
    pub async fn update_account(
        &self,
        user_id: UserId,
        name: &str,
        password: &str,
        confirm: &str,
    ) -> Result<User, AuthError> {
        let name = required("name", name)?;
        let new_password = validate_password_change(password.trim(), confirm.trim())?;
        let password_hash = new_password.map(hash_password).transpose()?;

        self.users.update_name(user_id, name).await.map_err(not_found)?;
        if let Some(hash) = password_hash {
            self.users
                .update_password(user_id, &hash)
                .await
                .map_err(not_found)?;
        }

        self.get_user(user_id).await
    }

    /// Delete an account and everything it owns.
    ///
    /// Returns the image URLs of the wardrobe items that were removed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn delete_account(&self, user_id: UserId) -> Result<Vec<String>, AuthError> {
        self.users.delete(user_id).await.map_err(not_found)
    }
}

fn not_found(err: RepositoryError) -> AuthError {
    match err {
        RepositoryError::NotFound => AuthError::UserNotFound,
        other => AuthError::Repository(other),
    }
}

/// Trim a form value, rejecting it if nothing is left.
fn required<'v>(field: &'static str, value: &'v str) -> Result<&'v str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(trimmed)
}

/// Validate password strength requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Decide whether an edit-profile submission changes the password.
///
/// Both fields blank means no change.
fn validate_password_change<'p>(
    password: &'p str,
    confirm: &str,
) -> Result<Option<&'p str>, AuthError> {
    if password.is_empty() && confirm.is_empty() {
        return Ok(None);
    }

    validate_password(password)?;
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }

    Ok(Some(password))
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
