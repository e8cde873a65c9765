//! Personal styler route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use glamdiva_core::{Occasion, StyleProfile, Undertone, WardrobeItem};

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::styling::StylingService;
use crate::state::AppState;

use super::{Flash, MessageQuery, non_blank};

/// Width of the free-text columns of `glamdiva.user_profile`, in characters.
const MAX_ATTRIBUTE_LEN: usize = 50;

/// Styling attributes form. Every field is optional; blank clears it.
#[derive(Debug, Default, Deserialize)]
pub struct StylerForm {
    pub skin_tone: Option<String>,
    pub undertone: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub occasion: Option<String>,
}

impl StylerForm {
    /// Validate the form and build a profile.
    ///
    /// Returns the message code of the first invalid field. Enumerated fields
    /// are checked before free-text lengths.
    pub fn into_profile(self) -> Result<StyleProfile, &'static str> {
        let undertone = non_blank(self.undertone)
            .map(|v| v.parse::<Undertone>())
            .transpose()
            .map_err(|_| "invalid_undertone")?;
        let occasion = non_blank(self.occasion)
            .map(|v| v.parse::<Occasion>())
            .transpose()
            .map_err(|_| "invalid_occasion")?;

        let skin_tone = non_blank(self.skin_tone);
        let eye_color = non_blank(self.eye_color);
        let hair_color = non_blank(self.hair_color);
        let too_long = [&skin_tone, &eye_color, &hair_color]
            .into_iter()
            .flatten()
            .any(|value| value.chars().count() > MAX_ATTRIBUTE_LEN);
        if too_long {
            return Err("attribute_too_long");
        }

        Ok(StyleProfile {
            skin_tone,
            undertone,
            eye_color,
            hair_color,
            occasion,
        })
    }
}

/// Personal styler page template.
#[derive(Template, WebTemplate)]
#[template(path = "personal-styler.html")]
pub struct StylerTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub skin_tone: String,
    pub eye_color: String,
    pub hair_color: String,
    /// Stored undertone label, empty when unset.
    pub undertone: &'static str,
    /// Stored occasion label, empty when unset.
    pub occasion: &'static str,
    pub undertones: &'static [Undertone],
    pub occasions: &'static [Occasion],
    pub phrases: Vec<&'static str>,
    pub palette: &'static [&'static str],
    pub picks: Vec<WardrobeItem>,
}

/// Display the personal styler.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let advice = StylingService::new(state.pool())
        .personal_styler(user.id)
        .await?;
    let profile = advice.profile;

    Ok(StylerTemplate {
        current_user: Some(user),
        flash: Flash::from_query(&query),
        skin_tone: profile.skin_tone.unwrap_or_default(),
        eye_color: profile.eye_color.unwrap_or_default(),
        hair_color: profile.hair_color.unwrap_or_default(),
        undertone: profile.undertone.map(Undertone::as_str).unwrap_or_default(),
        occasion: profile.occasion.map(Occasion::as_str).unwrap_or_default(),
        undertones: Undertone::ALL,
        occasions: Occasion::ALL,
        phrases: advice.suggestions.phrases,
        palette: advice.suggestions.palette,
        picks: advice.picks,
    })
}

/// Save the styling attributes.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<StylerForm>,
) -> Response {
    let profile = match form.into_profile() {
        Ok(profile) => profile,
        Err(code) => {
            tracing::debug!(code, "Rejected styler form");
            return Redirect::to(&format!("/personal-styler?error={code}")).into_response();
        }
    };

    match StylingService::new(state.pool())
        .save_preferences(user.id, &profile)
        .await
    {
        Ok(()) => {
            add_breadcrumb(
                "styler",
                "Saved preferences",
                &[("undertone", profile.undertone.map(Undertone::as_str).unwrap_or("none"))],
            );
            Redirect::to("/personal-styler?success=preferences_saved").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save styler preferences");
            Redirect::to("/personal-styler?error=save_failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(undertone: &str, occasion: &str) -> StylerForm {
        StylerForm {
            skin_tone: Some("Fair ".to_owned()),
            undertone: Some(undertone.to_owned()),
            eye_color: Some(String::new()),
            hair_color: Some("black".to_owned()),
            occasion: Some(occasion.to_owned()),
        }
    }

    #[test]
    fn test_valid_form_builds_profile() {
        let profile = form("Cool", "party")
            .into_profile()
            .unwrap_or_else(|code| panic!("rejected: {code}"));
        assert_eq!(profile.undertone, Some(Undertone::Cool));
        assert_eq!(profile.occasion, Some(Occasion::Party));
        assert_eq!(profile.skin_tone.as_deref(), Some("Fair"));
        assert_eq!(profile.eye_color, None);
    }

    #[test]
    fn test_blank_enum_fields_are_absent() {
        let profile = form("", "  ")
            .into_profile()
            .unwrap_or_else(|code| panic!("rejected: {code}"));
        assert_eq!(profile.undertone, None);
        assert_eq!(profile.occasion, None);

        let empty = StylerForm::default().into_profile();
        assert_eq!(empty, Ok(StyleProfile::default()));
    }

    #[test]
    fn test_invalid_enum_fields_rejected() {
        assert_eq!(form("olive", "work").into_profile().err(), Some("invalid_undertone"));
        assert_eq!(form("warm", "brunch").into_profile().err(), Some("invalid_occasion"));
        assert_eq!(form("olive", "brunch").into_profile().err(), Some("invalid_undertone"));
    }

    #[test]
    fn test_overlong_free_text_rejected() {
        let mut long = form("warm", "work");
        long.hair_color = Some("x".repeat(MAX_ATTRIBUTE_LEN + 1));
        assert_eq!(long.into_profile().err(), Some("attribute_too_long"));

        let mut at_limit = form("warm", "work");
        at_limit.eye_color = Some(format!("  {}  ", "é".repeat(MAX_ATTRIBUTE_LEN)));
        assert!(at_limit.into_profile().is_ok());
    }
}
