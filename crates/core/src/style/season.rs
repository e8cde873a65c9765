//! Seasonal colour analysis.
//!
//! # Rules
//!
//! A profile with no undertone has no season. Otherwise the undertone picks a
//! pair of seasons and contrast picks within the pair:
//!
//! | undertone | high contrast | low contrast |
//! |-----------|---------------|--------------|
//! | cool      | Winter        | Summer       |
//! | warm      | Spring        | Autumn       |
//! | neutral   | Winter        | Autumn       |
//!
//! High contrast means a light skin tone paired with dark hair; both fields
//! must be filled in.

use serde::Serialize;

use crate::types::{Season, StyleProfile, Undertone};

/// Skin tone fragments that count as light.
const LIGHT_SKIN_KEYWORDS: &[&str] = &["very fair", "fair", "light", "light-medium"];

/// Hair colour fragments that count as dark.
const DARK_HAIR_KEYWORDS: &[&str] = &["black", "dark", "deep"];

/// Hex colours recommended (and discouraged) for a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonPalette {
    pub neutrals: [&'static str; 4],
    pub accents: [&'static str; 4],
    pub avoid: [&'static str; 3],
}

const WINTER: SeasonPalette = SeasonPalette {
    neutrals: ["#000000", "#2F4F4F", "#FFFFFF", "#C0C0C0"],
    accents: ["#0F52BA", "#228B22", "#800080", "#DC143C"],
    avoid: ["#C19A6B", "#DAA520", "#8B4513"],
};

const SUMMER: SeasonPalette = SeasonPalette {
    neutrals: ["#708090", "#D3D3D3", "#F8F8FF", "#C0C0C0"],
    accents: ["#87CEFA", "#6A5ACD", "#3CB371", "#DB7093"],
    avoid: ["#8B4513", "#B5651D", "#FF8C00"],
};

const SPRING: SeasonPalette = SeasonPalette {
    neutrals: ["#FFF8DC", "#F5F5DC", "#C19A6B", "#8B4513"],
    accents: ["#FFD700", "#FF8C00", "#32CD32", "#FF69B4"],
    avoid: ["#808080", "#4B0082", "#2F4F4F"],
};

const AUTUMN: SeasonPalette = SeasonPalette {
    neutrals: ["#8B4513", "#654321", "#C19A6B", "#F5DEB3"],
    accents: ["#556B2F", "#B8860B", "#A0522D", "#CD5C5C"],
    avoid: ["#FFFFFF", "#ADD8E6", "#9370DB"],
};

impl Season {
    /// The fixed palette for this season.
    #[must_use]
    pub const fn palette(self) -> &'static SeasonPalette {
        match self {
            Self::Winter => &WINTER,
            Self::Summer => &SUMMER,
            Self::Spring => &SPRING,
            Self::Autumn => &AUTUMN,
        }
    }

    /// Colour names searched for in the wardrobe during colour analysis.
    #[must_use]
    pub const fn color_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Winter => &[
                "black", "white", "navy", "emerald", "crimson", "purple", "silver", "gray",
                "grey",
            ],
            Self::Summer => &[
                "slate",
                "lavender",
                "rose",
                "mint",
                "light blue",
                "gray",
                "grey",
                "soft white",
            ],
            Self::Spring => &[
                "ivory", "camel", "beige", "gold", "lime", "coral", "peach", "brown",
            ],
            Self::Autumn => &[
                "olive",
                "mustard",
                "rust",
                "terracotta",
                "tan",
                "brown",
                "warm beige",
            ],
        }
    }

    /// Season for an undertone at the given contrast level.
    #[must_use]
    pub const fn for_undertone(undertone: Undertone, high_contrast: bool) -> Self {
        match (undertone, high_contrast) {
            (Undertone::Cool, true) | (Undertone::Neutral, true) => Self::Winter,
            (Undertone::Cool, false) => Self::Summer,
            (Undertone::Warm, true) => Self::Spring,
            (Undertone::Warm, false) | (Undertone::Neutral, false) => Self::Autumn,
        }
    }
}

/// Result of classifying a profile.
///
/// When `season` is `None`, `palette` is `None` and `color_keywords` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColourAnalysis {
    pub season: Option<Season>,
    pub palette: Option<&'static SeasonPalette>,
    pub color_keywords: &'static [&'static str],
}

/// Light skin and dark hair, both present.
#[must_use]
pub fn is_high_contrast(skin_tone: Option<&str>, hair_color: Option<&str>) -> bool {
    let (Some(skin), Some(hair)) = (skin_tone, hair_color) else {
        return false;
    };

    let skin = skin.to_lowercase();
    let hair = hair.to_lowercase();

    LIGHT_SKIN_KEYWORDS.iter().any(|k| skin.contains(k))
        && DARK_HAIR_KEYWORDS.iter().any(|k| hair.contains(k))
}

/// Classify a profile into a season with its palette and keywords.
///
/// Eye colour is accepted as part of the profile but does not affect the
/// result.
#[must_use]
pub fn classify_season(profile: &StyleProfile) -> ColourAnalysis {
    let season = profile.undertone.map(|undertone| {
        let high_contrast =
            is_high_contrast(profile.skin_tone.as_deref(), profile.hair_color.as_deref());
        Season::for_undertone(undertone, high_contrast)
    });

    ColourAnalysis {
        season,
        palette: season.map(Season::palette),
        color_keywords: season.map(Season::color_keywords).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Occasion;

    fn profile(undertone: Option<Undertone>, skin: Option<&str>, hair: Option<&str>) -> StyleProfile {
        StyleProfile {
            skin_tone: skin.map(str::to_owned),
            undertone,
            eye_color: None,
            hair_color: hair.map(str::to_owned),
            occasion: None,
        }
    }

    #[test]
    fn test_no_undertone_means_no_season() {
        let filled = StyleProfile {
            skin_tone: Some("very fair".to_owned()),
            undertone: None,
            eye_color: Some("blue".to_owned()),
            hair_color: Some("black".to_owned()),
            occasion: Some(Occasion::Work),
        };

        for p in [StyleProfile::default(), filled] {
            let analysis = classify_season(&p);
            assert_eq!(analysis.season, None);
            assert_eq!(analysis.palette, None);
            assert!(analysis.color_keywords.is_empty());
        }
    }

    #[test]
    fn test_cool_fair_black_is_winter() {
        let analysis = classify_season(&profile(Some(Undertone::Cool), Some("fair"), Some("black")));
        assert_eq!(analysis.season, Some(Season::Winter));
        assert_eq!(analysis.palette, Some(&WINTER));
        assert!(analysis.color_keywords.contains(&"crimson"));
    }

    #[test]
    fn test_cool_deep_skin_is_summer() {
        let analysis = classify_season(&profile(Some(Undertone::Cool), Some("deep"), Some("black")));
        assert_eq!(analysis.season, Some(Season::Summer));
    }

    #[test]
    fn test_warm_without_skin_or_hair_is_autumn() {
        let analysis = classify_season(&profile(Some(Undertone::Warm), None, None));
        assert_eq!(analysis.season, Some(Season::Autumn));
        assert_eq!(analysis.palette.map(|p| p.avoid), Some(["#FFFFFF", "#ADD8E6", "#9370DB"]));
    }

    #[test]
    fn test_contrast_needs_both_fields() {
        assert!(!is_high_contrast(Some("fair"), None));
        assert!(!is_high_contrast(None, Some("black")));
        assert!(is_high_contrast(Some("Light-Medium"), Some("Dark Brown")));
        assert!(!is_high_contrast(Some("medium"), Some("dark brown")));
        assert!(!is_high_contrast(Some("fair"), Some("blonde")));
    }

    #[test]
    fn test_decision_table_is_exhaustive() {
        let expected = [
            (Undertone::Cool, true, Season::Winter),
            (Undertone::Cool, false, Season::Summer),
            (Undertone::Warm, true, Season::Spring),
            (Undertone::Warm, false, Season::Autumn),
            (Undertone::Neutral, true, Season::Winter),
            (Undertone::Neutral, false, Season::Autumn),
        ];
        assert_eq!(expected.len(), Undertone::ALL.len() * 2);

        for (undertone, high_contrast, season) in expected {
            assert_eq!(Season::for_undertone(undertone, high_contrast), season);

            let (skin, hair) = if high_contrast {
                (Some("very fair"), Some("deep black"))
            } else {
                (Some("olive"), Some("auburn"))
            };
            assert_eq!(
                classify_season(&profile(Some(undertone), skin, hair)).season,
                Some(season),
                "{undertone} / high_contrast={high_contrast}"
            );
        }
    }

    #[test]
    fn test_every_season_has_full_palette_and_keywords() {
        for season in Season::ALL {
            let palette = season.palette();
            for hex in palette.neutrals.iter().chain(&palette.accents).chain(&palette.avoid) {
                assert!(hex.starts_with('#') && hex.len() == 7, "{season}: {hex}");
            }
            let keywords = season.color_keywords();
            assert!((7..=9).contains(&keywords.len()), "{season}");
            assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }
}
