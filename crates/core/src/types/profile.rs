//! Styling profile attributes.

use serde::{Deserialize, Serialize};

use super::styling::{Occasion, Undertone};

/// The form-entered attributes the style engine works from.
///
/// Free-text fields are kept as typed; the engine lowercases them when it
/// needs to compare. An all-`None` profile is valid and yields empty
/// suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// e.g. "very fair", "medium", "deep".
    pub skin_tone: Option<String>,
    pub undertone: Option<Undertone>,
    /// Accepted and stored, not used by any rule yet.
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub occasion: Option<Occasion>,
}

impl StyleProfile {
    /// Build a profile from raw stored columns.
    ///
    /// Unknown undertone or occasion labels become `None`; blank free-text
    /// fields are dropped.
    #[must_use]
    pub fn from_stored(
        skin_tone: Option<String>,
        undertone: Option<&str>,
        eye_color: Option<String>,
        hair_color: Option<String>,
        occasion: Option<&str>,
    ) -> Self {
        Self {
            skin_tone: non_blank(skin_tone),
            undertone: Undertone::from_stored(undertone),
            eye_color: non_blank(eye_color),
            hair_color: non_blank(hair_color),
            occasion: Occasion::from_stored(occasion),
        }
    }

    /// `true` when no attribute has been set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.skin_tone.is_none()
            && self.undertone.is_none()
            && self.eye_color.is_none()
            && self.hair_color.is_none()
            && self.occasion.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_stored_drops_unknown_and_blank_values() {
        let profile = StyleProfile::from_stored(
            Some("fair".to_owned()),
            Some("sunny"),
            Some("  ".to_owned()),
            Some("black".to_owned()),
            Some("Party"),
        );

        assert_eq!(profile.skin_tone.as_deref(), Some("fair"));
        assert_eq!(profile.undertone, None);
        assert_eq!(profile.eye_color, None);
        assert_eq!(profile.hair_color.as_deref(), Some("black"));
        assert_eq!(profile.occasion, Some(Occasion::Party));
    }

    #[test]
    fn test_default_profile_is_empty() {
        assert!(StyleProfile::default().is_empty());
        let profile = StyleProfile {
            undertone: Some(Undertone::Cool),
            ..StyleProfile::default()
        };
        assert!(!profile.is_empty());
    }
}
