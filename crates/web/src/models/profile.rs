//! Stored style profile.

use glamdiva_core::{ProfileId, StyleProfile, UserId};

/// A user's saved styling attributes.
///
/// One row per user, created lazily the first time a styling page needs it.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub attributes: StyleProfile,
}

/// Raw `glamdiva.user_profile` row; enum columns are plain text.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProfileRow {
    pub id: ProfileId,
    pub user_id: UserId,
    pub skin_tone: Option<String>,
    pub undertone: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub occasion: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        let attributes = StyleProfile::from_stored(
            row.skin_tone,
            row.undertone.as_deref(),
            row.eye_color,
            row.hair_color,
            row.occasion.as_deref(),
        );

        Self {
            id: row.id,
            user_id: row.user_id,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use glamdiva_core::{Occasion, Undertone};

    use super::*;

    #[test]
    fn test_row_with_stale_enum_values_reads_as_absent() {
        let row = ProfileRow {
            id: ProfileId::new(1),
            user_id: UserId::new(9),
            skin_tone: Some("medium".to_owned()),
            undertone: Some("olive".to_owned()),
            eye_color: None,
            hair_color: Some(String::new()),
            occasion: Some("Wedding".to_owned()),
        };

        let profile = Profile::from(row);
        assert_eq!(profile.user_id, UserId::new(9));
        assert_eq!(profile.attributes.skin_tone.as_deref(), Some("medium"));
        assert_eq!(profile.attributes.undertone, None::<Undertone>);
        assert_eq!(profile.attributes.hair_color, None);
        assert_eq!(profile.attributes.occasion, Some(Occasion::Wedding));
    }
}
