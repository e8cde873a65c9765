//! Core types for GlamDiva.
//!
//! This module provides type-safe wrappers for the domain concepts shared by
//! the web application and the CLI.

pub mod email;
pub mod id;
pub mod profile;
pub mod styling;
pub mod wardrobe;

pub use email::{Email, EmailError};
pub use id::*;
pub use profile::StyleProfile;
pub use styling::{Occasion, ParseEnumError, Season, Undertone};
pub use wardrobe::WardrobeItem;
