//! Colour analysis route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use glamdiva_core::{Season, SeasonPalette, StyleProfile, Undertone, WardrobeItem};

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::styling::StylingService;
use crate::state::AppState;

use super::{Flash, MessageQuery};

/// Colour analysis page template.
#[derive(Template, WebTemplate)]
#[template(path = "colour-analysis.html")]
pub struct ColourAnalysisTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub profile: StyleProfile,
    pub season: Option<Season>,
    pub palette: Option<&'static SeasonPalette>,
    pub hits: Vec<WardrobeItem>,
}

impl ColourAnalysisTemplate {
    /// The stored undertone label, empty when unset.
    #[must_use]
    pub fn undertone_label(&self) -> &'static str {
        self.profile.undertone.map(Undertone::as_str).unwrap_or_default()
    }
}

/// Display the colour analysis.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let advice = StylingService::new(state.pool())
        .colour_analysis(user.id)
        .await?;

    Ok(ColourAnalysisTemplate {
        current_user: Some(user),
        flash: Flash::from_query(&query),
        profile: advice.profile,
        season: advice.analysis.season,
        palette: advice.analysis.palette,
        hits: advice.hits,
    })
}
