//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Registration, login and account changes
//! - `uploads` - Wardrobe photo storage
//! - `styling` - Loads stored data and runs the style engine for a page

pub mod auth;
pub mod styling;
pub mod uploads;
