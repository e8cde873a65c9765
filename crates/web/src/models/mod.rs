//! Domain models for the web application.
//!
//! Wardrobe items and style profiles are shared with the CLI and live in
//! `glamdiva-core`; this module holds the web-only account types.

pub mod profile;
pub mod session;
pub mod user;

pub use profile::Profile;
pub use session::CurrentUser;
pub use user::User;
