//! Personal styler suggestions.
//!
//! The styler page shows undertone phrases followed by occasion phrases, a
//! five-colour undertone palette, and wardrobe picks found with
//! [`styler_keywords`].

use serde::Serialize;

use crate::types::{Occasion, StyleProfile, Undertone};

impl Undertone {
    /// Descriptive colour/style phrases for this undertone.
    #[must_use]
    pub const fn style_phrases(self) -> &'static [&'static str] {
        match self {
            Self::Cool => &[
                "jewel tones",
                "blue",
                "emerald",
                "amethyst",
                "cool gray",
                "crisp white",
            ],
            Self::Warm => &["earth tones", "olive", "mustard", "rust", "camel", "ivory"],
            Self::Neutral => &[
                "soft pastels",
                "taupe",
                "peach",
                "mauve",
                "balanced grays",
                "off-white",
            ],
        }
    }

    /// Five hex colours shown as the styler palette.
    #[must_use]
    pub const fn palette(self) -> &'static [&'static str] {
        match self {
            Self::Cool => &["#0f52ba", "#50c7f2", "#6a0dad", "#2f4f4f", "#ffffff"],
            Self::Warm => &["#b5651d", "#c19a6b", "#556b2f", "#8b4513", "#fffff0"],
            Self::Neutral => &["#e6e0d4", "#d8bfd8", "#f5deb3", "#708090", "#f8f8ff"],
        }
    }

    /// Colour words searched for in the wardrobe by the personal styler.
    ///
    /// Distinct from [`Season::color_keywords`](crate::Season::color_keywords).
    #[must_use]
    pub const fn wardrobe_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Cool => &[
                "blue", "navy", "emerald", "purple", "amethyst", "grey", "gray", "white",
            ],
            Self::Warm => &[
                "brown", "tan", "beige", "mustard", "olive", "rust", "camel", "ivory",
            ],
            Self::Neutral => &[
                "taupe",
                "peach",
                "mauve",
                "pastel",
                "gray",
                "grey",
                "off-white",
            ],
        }
    }
}

impl Occasion {
    /// Colours suggested for this occasion. `Custom` has none.
    #[must_use]
    pub const fn style_phrases(self) -> &'static [&'static str] {
        match self {
            Self::Work => &["navy", "charcoal", "white", "muted blue"],
            Self::Casual => &["denim", "olive", "beige", "white"],
            Self::Party => &["metallic", "deep red", "emerald", "black"],
            Self::Wedding => &["pastel", "champagne", "ivory", "soft pink"],
            Self::Festive => &["gold", "maroon", "royal blue", "bottle green"],
            Self::Sports => &["black", "electric blue", "neon accents"],
            Self::Custom => &[],
        }
    }

    /// Garment words searched for in the wardrobe. `Custom` has none.
    #[must_use]
    pub const fn wardrobe_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Work => &["blazer", "shirt", "trouser", "formal", "office"],
            Self::Casual => &["tee", "t-shirt", "jeans", "hoodie", "sneaker", "casual"],
            Self::Party => &["sequin", "dress", "bodycon", "heels", "party"],
            Self::Wedding => &["sherwani", "lehenga", "sari", "gown", "pastel", "wedding"],
            Self::Festive => &["kurta", "ethnic", "embroidery", "gold", "festive"],
            Self::Sports => &["track", "jersey", "shorts", "sweat", "sport"],
            Self::Custom => &[],
        }
    }
}

/// Phrases and palette for the personal styler page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylerSuggestions {
    /// Undertone phrases first, then occasion phrases.
    pub phrases: Vec<&'static str>,
    /// Zero or five hex colours.
    pub palette: &'static [&'static str],
}

/// Assemble styler suggestions for a profile.
#[must_use]
pub fn build_styler_suggestions(profile: &StyleProfile) -> StylerSuggestions {
    let undertone_phrases = profile.undertone.map(Undertone::style_phrases).unwrap_or_default();
    let occasion_phrases = profile.occasion.map(Occasion::style_phrases).unwrap_or_default();

    StylerSuggestions {
        phrases: [undertone_phrases, occasion_phrases].concat(),
        palette: profile.undertone.map(Undertone::palette).unwrap_or_default(),
    }
}

/// Keywords the personal styler matches wardrobe items against.
///
/// Undertone keywords first, then occasion keywords. Empty when neither is
/// set (or the occasion is `Custom` and there is no undertone).
#[must_use]
pub fn styler_keywords(profile: &StyleProfile) -> Vec<&'static str> {
    let undertone = profile.undertone.map(Undertone::wardrobe_keywords).unwrap_or_default();
    let occasion = profile.occasion.map(Occasion::wardrobe_keywords).unwrap_or_default();
    [undertone, occasion].concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(undertone: Option<Undertone>, occasion: Option<Occasion>) -> StyleProfile {
        StyleProfile {
            undertone,
            occasion,
            ..StyleProfile::default()
        }
    }

    #[test]
    fn test_warm_party_concatenates_in_order() {
        let suggestions = build_styler_suggestions(&profile(Some(Undertone::Warm), Some(Occasion::Party)));

        assert_eq!(suggestions.phrases.len(), 10);
        assert_eq!(
            suggestions.phrases,
            vec![
                "earth tones",
                "olive",
                "mustard",
                "rust",
                "camel",
                "ivory",
                "metallic",
                "deep red",
                "emerald",
                "black",
            ]
        );
        assert_eq!(suggestions.palette, Undertone::Warm.palette());
    }

    #[test]
    fn test_empty_profile_yields_nothing() {
        let suggestions = build_styler_suggestions(&StyleProfile::default());
        assert!(suggestions.phrases.is_empty());
        assert!(suggestions.palette.is_empty());
        assert!(styler_keywords(&StyleProfile::default()).is_empty());
    }

    #[test]
    fn test_occasion_without_undertone() {
        let suggestions = build_styler_suggestions(&profile(None, Some(Occasion::Sports)));
        assert_eq!(suggestions.phrases, vec!["black", "electric blue", "neon accents"]);
        assert!(suggestions.palette.is_empty());
    }

    #[test]
    fn test_custom_occasion_adds_nothing() {
        let with_custom = build_styler_suggestions(&profile(Some(Undertone::Cool), Some(Occasion::Custom)));
        let without = build_styler_suggestions(&profile(Some(Undertone::Cool), None));
        assert_eq!(with_custom, without);
        assert_eq!(
            styler_keywords(&profile(Some(Undertone::Cool), Some(Occasion::Custom))),
            Undertone::Cool.wardrobe_keywords()
        );
    }

    #[test]
    fn test_keywords_undertone_then_occasion() {
        let keywords = styler_keywords(&profile(Some(Undertone::Neutral), Some(Occasion::Work)));
        assert_eq!(keywords.first(), Some(&"taupe"));
        assert_eq!(keywords.last(), Some(&"office"));
        assert_eq!(keywords.len(), 7 + 5);
    }

    #[test]
    fn test_table_sizes() {
        for undertone in Undertone::ALL {
            assert!((5..=6).contains(&undertone.style_phrases().len()));
            assert_eq!(undertone.palette().len(), 5);
        }
        for occasion in Occasion::ALL {
            let n = occasion.style_phrases().len();
            if *occasion == Occasion::Custom {
                assert_eq!(n, 0);
                assert!(occasion.wardrobe_keywords().is_empty());
            } else {
                assert!((3..=4).contains(&n), "{occasion}");
                assert!((4..=6).contains(&occasion.wardrobe_keywords().len()), "{occasion}");
            }
        }
    }
}
