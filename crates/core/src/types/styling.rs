//! Enumerated styling attributes.
//!
//! Profiles are persisted as lowercase text. Parsing is case-insensitive and
//! ignores surrounding whitespace; [`Undertone::from_stored`] and friends turn
//! anything unrecognized into `None` so stale or hand-edited rows degrade to
//! "absent" instead of failing a page render.

use thiserror::Error;

/// A value that is not one of an enum's known labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Which attribute was being parsed (`"undertone"`, `"occasion"`, ...).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The canonical label, as stored in the database and shown in forms.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Read a stored column value, treating unknown labels as absent.
            #[must_use]
            pub fn from_stored(value: Option<&str>) -> Option<Self> {
                value.and_then(|v| v.parse().ok())
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

labelled_enum! {
    /// The base of a user's skin colour. Drives every lookup table.
    pub enum Undertone as "undertone" {
        Cool => "cool",
        Warm => "warm",
        Neutral => "neutral",
    }
}

labelled_enum! {
    /// What the user is dressing for.
    pub enum Occasion as "occasion" {
        Work => "work",
        Casual => "casual",
        Party => "party",
        Wedding => "wedding",
        Festive => "festive",
        Sports => "sports",
        /// No preset; contributes no phrases or keywords.
        Custom => "custom",
    }
}

labelled_enum! {
    /// Seasonal colour archetype derived from undertone and contrast.
    pub enum Season as "season" {
        Winter => "Winter",
        Summer => "Summer",
        Spring => "Spring",
        Autumn => "Autumn",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(" Cool ".parse::<Undertone>().unwrap(), Undertone::Cool);
        assert_eq!("FESTIVE".parse::<Occasion>().unwrap(), Occasion::Festive);
        assert_eq!("autumn".parse::<Season>().unwrap(), Season::Autumn);
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        let err = "olive".parse::<Undertone>().unwrap_err();
        assert_eq!(err.kind, "undertone");
        assert_eq!(err.value, "olive");
        assert_eq!(err.to_string(), "invalid undertone: \"olive\"");

        assert!("".parse::<Occasion>().is_err());
        assert!("brunch".parse::<Occasion>().is_err());
    }

    #[test]
    fn test_from_stored_degrades_to_absent() {
        assert_eq!(Undertone::from_stored(Some("warm")), Some(Undertone::Warm));
        assert_eq!(Undertone::from_stored(Some("tan")), None);
        assert_eq!(Undertone::from_stored(None), None);
        assert_eq!(Occasion::from_stored(Some("custom")), Some(Occasion::Custom));
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for occasion in Occasion::ALL {
            assert_eq!(occasion.to_string().parse::<Occasion>().unwrap(), *occasion);
        }
        assert_eq!(Occasion::ALL.len(), 7);
        assert_eq!(Undertone::ALL.len(), 3);
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Season::Winter).unwrap(), "\"Winter\"");
        assert_eq!(serde_json::to_string(&Undertone::Neutral).unwrap(), "\"neutral\"");
    }
}
