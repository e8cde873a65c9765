//! Style profile repository.
//!
//! A profile row is created on first use by [`ProfileRepository::get_or_create`]
//! and afterwards only changed by [`ProfileRepository::save`].

use sqlx::PgPool;
use tracing::instrument;

use glamdiva_core::{Occasion, StyleProfile, Undertone, UserId};

use super::RepositoryError;
use crate::models::Profile;
use crate::models::profile::ProfileRow;

const PROFILE_COLUMNS: &str = "id, user_id, skin_tone, undertone, eye_color, hair_color, occasion";

/// Repository for `glamdiva.user_profile`.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's profile, if one has been created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM glamdiva.user_profile WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Profile::from))
    }

    /// Get a user's profile, inserting an empty one if none exists.
    ///
    /// Concurrent first requests for the same user both end up with the
    /// single row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Profile, RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO glamdiva.user_profile (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        self.get(user_id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Store a user's styling attributes, replacing whatever was there.
    ///
    /// Last write wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, attributes))]
    pub async fn save(
        &self,
        user_id: UserId,
        attributes: &StyleProfile,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r"
            INSERT INTO glamdiva.user_profile
                (user_id, skin_tone, undertone, eye_color, hair_color, occasion)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                skin_tone = EXCLUDED.skin_tone,
                undertone = EXCLUDED.undertone,
                eye_color = EXCLUDED.eye_color,
                hair_color = EXCLUDED.hair_color,
                occasion = EXCLUDED.occasion
            RETURNING {PROFILE_COLUMNS}
            "
        ))
        .bind(user_id)
        .bind(attributes.skin_tone.as_deref())
        .bind(attributes.undertone.map(Undertone::as_str))
        .bind(attributes.eye_color.as_deref())
        .bind(attributes.hair_color.as_deref())
        .bind(attributes.occasion.map(Occasion::as_str))
        .fetch_one(self.pool)
        .await?;

        Ok(Profile::from(row))
    }
}
