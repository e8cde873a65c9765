//! Style engine glue.
//!
//! Reads the stored profile and wardrobe for one user, runs the pure engine
//! in `glamdiva-core`, and returns everything a styling page renders.

use sqlx::PgPool;
use tracing::instrument;

use glamdiva_core::{
    ColourAnalysis, MatchContext, Season, StyleProfile, StylerSuggestions, UserId, WardrobeItem,
    build_styler_suggestions, classify_season, pick_wardrobe_matches, styler_keywords,
};

use crate::db::{ProfileRepository, RepositoryError, WardrobeRepository};

/// Output for the personal styler page.
#[derive(Debug, Clone)]
pub struct StylerAdvice {
    pub profile: StyleProfile,
    pub suggestions: StylerSuggestions,
    /// Matching items, or the most recent ones when nothing matches.
    pub picks: Vec<WardrobeItem>,
}

/// Output for the colour analysis page.
#[derive(Debug, Clone)]
pub struct SeasonAdvice {
    pub profile: StyleProfile,
    pub analysis: ColourAnalysis,
    /// Items in the season's colours; may be empty.
    pub hits: Vec<WardrobeItem>,
}

/// Runs the style engine against a user's stored data.
pub struct StylingService<'a> {
    profiles: ProfileRepository<'a>,
    wardrobe: WardrobeRepository<'a>,
}

impl<'a> StylingService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            profiles: ProfileRepository::new(pool),
            wardrobe: WardrobeRepository::new(pool),
        }
    }

    /// Suggestions and wardrobe picks for the personal styler.
    ///
    /// Creates an empty profile on first visit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a store read fails.
    #[instrument(skip(self))]
    pub async fn personal_styler(&self, owner: UserId) -> Result<StylerAdvice, RepositoryError> {
        let profile = self.profiles.get_or_create(owner).await?.attributes;

        let suggestions = build_styler_suggestions(&profile);
        let keywords = styler_keywords(&profile);
        let picks =
            pick_wardrobe_matches(&self.wardrobe, owner, &keywords, MatchContext::PersonalStyler)
                .await?;

        tracing::debug!(
            user_id = %owner,
            keywords = keywords.len(),
            matches = picks.len(),
            "Built styler advice"
        );

        Ok(StylerAdvice {
            profile,
            suggestions,
            picks,
        })
    }

    /// Season, palette and in-season wardrobe items.
    ///
    /// A user without a saved profile is analysed as an empty profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a store read fails.
    #[instrument(skip(self))]
    pub async fn colour_analysis(&self, owner: UserId) -> Result<SeasonAdvice, RepositoryError> {
        let profile = self
            .profiles
            .get(owner)
            .await?
            .map(|p| p.attributes)
            .unwrap_or_default();

        let analysis = classify_season(&profile);
        let hits = pick_wardrobe_matches(
            &self.wardrobe,
            owner,
            analysis.color_keywords,
            MatchContext::ColourAnalysis,
        )
        .await?;

        tracing::debug!(
            user_id = %owner,
            season = analysis.season.map(Season::as_str),
            matches = hits.len(),
            "Built colour analysis"
        );

        Ok(SeasonAdvice {
            profile,
            analysis,
            hits,
        })
    }

    /// Save the styler form.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    pub async fn save_preferences(
        &self,
        owner: UserId,
        profile: &StyleProfile,
    ) -> Result<(), RepositoryError> {
        self.profiles.save(owner, profile).await?;
        tracing::info!(user_id = %owner, "Saved styler preferences");
        Ok(())
    }
}
