//! The style recommendation engine.
//!
//! Three rule sets, all expressed as static tables keyed by the styling enums:
//!
//! - [`season`] - undertone + contrast → [`Season`](crate::Season), palette and
//!   colour keywords (colour analysis page)
//! - [`suggestions`] - undertone + occasion → suggestion phrases and a flat
//!   palette (personal styler page)
//! - [`matcher`] - keyword sets → the user's matching wardrobe items
//!
//! Nothing here writes; every function is a pure read of its inputs, apart
//! from [`pick_wardrobe_matches`] which reads through a [`WardrobeSource`].

pub mod matcher;
pub mod season;
pub mod suggestions;

pub use matcher::{MatchContext, WardrobeSource, pick_wardrobe_matches};
pub use season::{ColourAnalysis, SeasonPalette, classify_season, is_high_contrast};
pub use suggestions::{StylerSuggestions, build_styler_suggestions, styler_keywords};
