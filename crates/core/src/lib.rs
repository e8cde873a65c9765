//! GlamDiva Core - Shared types and the style recommendation engine.
//!
//! This crate is used by:
//! - `web` - The wardrobe and styling web application
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types, lookup tables and pure functions - no
//! database access, no HTTP. Store access goes through the [`WardrobeSource`]
//! trait so the matching rules can run against Postgres or an in-memory slice.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, email, styling enums, profile and wardrobe item
//! - [`style`] - Season classification, styler suggestions and wardrobe matching

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod style;
pub mod types;

pub use style::{
    ColourAnalysis, MatchContext, SeasonPalette, StylerSuggestions, WardrobeSource,
    build_styler_suggestions, classify_season, pick_wardrobe_matches, styler_keywords,
};
pub use types::*;
