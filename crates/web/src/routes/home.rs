//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;

use super::{Flash, MessageQuery};

/// A tile linking to one of the main features.
pub struct FeatureLink {
    pub href: &'static str,
    pub title: &'static str,
    pub blurb: &'static str,
}

const FEATURES: &[FeatureLink] = &[
    FeatureLink {
        href: "/wardrobe",
        title: "My Wardrobe",
        blurb: "Catalogue your clothes with photos, colours and notes.",
    },
    FeatureLink {
        href: "/personal-styler",
        title: "Personal Styler",
        blurb: "Tell us your undertone and occasion for colour ideas and outfit picks.",
    },
    FeatureLink {
        href: "/colour-analysis",
        title: "Colour Analysis",
        blurb: "Find your season, its palette, and which of your pieces fit it.",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub features: &'static [FeatureLink],
}

/// Display the home page.
pub async fn home(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    HomeTemplate {
        current_user: Some(user),
        flash: Flash::from_query(&query),
        features: FEATURES,
    }
}
