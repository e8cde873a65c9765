//! Wardrobe matching.
//!
//! Picks the items from a user's wardrobe whose colour, notes or category
//! mention any of a keyword set, newest first. The two pages that show picks
//! differ in how many they show and in what happens when nothing matches:
//!
//! | context          | limit | no keywords / no matches |
//! |------------------|-------|--------------------------|
//! | personal styler  | 6     | 6 most recent items      |
//! | colour analysis  | 8     | nothing                  |

use std::convert::Infallible;

use crate::types::{UserId, WardrobeItem};

/// Which page the picks are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchContext {
    PersonalStyler,
    ColourAnalysis,
}

impl MatchContext {
    /// Maximum number of items returned.
    #[must_use]
    pub const fn limit(self) -> usize {
        match self {
            Self::PersonalStyler => 6,
            Self::ColourAnalysis => 8,
        }
    }

    /// Whether an empty result is replaced by the most recent items.
    #[must_use]
    pub const fn falls_back_to_recent(self) -> bool {
        matches!(self, Self::PersonalStyler)
    }
}

/// Read access to a user's wardrobe.
///
/// Implemented by the Postgres repository in the web crate and by plain
/// slices of items for tests and offline use. Both methods return items owned
/// by `owner` only, ordered by `created_at` descending (ties by id
/// descending).
pub trait WardrobeSource {
    type Error;

    /// The `limit` most recently created items.
    fn recent_items(
        &self,
        owner: UserId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WardrobeItem>, Self::Error>> + Send;

    /// Up to `limit` items where any keyword is a case-insensitive substring
    /// of the colour, notes or category.
    fn items_matching(
        &self,
        owner: UserId,
        keywords: &[&str],
        limit: usize,
    ) -> impl Future<Output = Result<Vec<WardrobeItem>, Self::Error>> + Send;
}

/// Pick wardrobe items for a page.
///
/// An empty keyword set skips matching. When the match set comes back empty
/// the personal styler shows the most recent items instead; colour analysis
/// shows none.
///
/// # Errors
///
/// Propagates the source's read errors.
pub async fn pick_wardrobe_matches<S>(
    source: &S,
    owner: UserId,
    keywords: &[&str],
    context: MatchContext,
) -> Result<Vec<WardrobeItem>, S::Error>
where
    S: WardrobeSource + Sync + ?Sized,
{
    let limit = context.limit();

    if !keywords.is_empty() {
        let matches = source.items_matching(owner, keywords, limit).await?;
        if !matches.is_empty() {
            return Ok(matches);
        }
    }

    if context.falls_back_to_recent() {
        source.recent_items(owner, limit).await
    } else {
        Ok(Vec::new())
    }
}

impl WardrobeSource for [WardrobeItem] {
    type Error = Infallible;

    async fn recent_items(
        &self,
        owner: UserId,
        limit: usize,
    ) -> Result<Vec<WardrobeItem>, Self::Error> {
        Ok(newest_first(self, owner, |_| true, limit))
    }

    async fn items_matching(
        &self,
        owner: UserId,
        keywords: &[&str],
        limit: usize,
    ) -> Result<Vec<WardrobeItem>, Self::Error> {
        Ok(newest_first(self, owner, |item| item.matches_any(keywords), limit))
    }
}

fn newest_first(
    items: &[WardrobeItem],
    owner: UserId,
    keep: impl Fn(&WardrobeItem) -> bool,
    limit: usize,
) -> Vec<WardrobeItem> {
    let mut selected: Vec<WardrobeItem> = items
        .iter()
        .filter(|item| item.user_id == owner && keep(item))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    selected.truncate(limit);
    selected
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::style::{classify_season, styler_keywords};
    use crate::types::{Occasion, StyleProfile, Undertone, WardrobeItemId};

    const OWNER: UserId = UserId::new(1);

    fn item(id: i32, owner: UserId, category: &str, color: Option<&str>) -> WardrobeItem {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        WardrobeItem {
            id: WardrobeItemId::new(id),
            user_id: owner,
            name: format!("item {id}"),
            category: category.to_owned(),
            color: color.map(str::to_owned),
            notes: None,
            image_url: None,
            created_at: base + Duration::hours(i64::from(id)),
        }
    }

    fn ids(items: &[WardrobeItem]) -> Vec<i32> {
        items.iter().map(|i| i.id.as_i32()).collect()
    }

    /// Ten items for OWNER (ids 1..=10, newer ids created later), one for someone else.
    fn wardrobe() -> Vec<WardrobeItem> {
        let mut items = vec![
            item(1, OWNER, "Top", Some("Navy")),
            item(2, OWNER, "Bottom", Some("Olive")),
            item(3, OWNER, "Blazer", Some("Charcoal")),
            item(4, OWNER, "Top", Some("White")),
            item(5, OWNER, "Dress", Some("Rust")),
            item(6, OWNER, "Shoes", None),
            item(7, OWNER, "Top", Some("Emerald Green")),
            item(8, OWNER, "Bottom", Some("Tan")),
            item(9, OWNER, "Scarf", Some("Mustard")),
            item(10, OWNER, "Top", Some("Grey")),
        ];
        items.push(item(11, UserId::new(2), "Top", Some("Navy")));
        items
    }

    #[tokio::test]
    async fn test_empty_keywords_fall_back_to_six_most_recent() {
        let items = wardrobe();
        let picks = pick_wardrobe_matches(items.as_slice(), OWNER, &[], MatchContext::PersonalStyler)
            .await
            .unwrap();
        assert_eq!(ids(&picks), vec![10, 9, 8, 7, 6, 5]);
    }

    #[tokio::test]
    async fn test_styler_prefers_matches_over_recency() {
        let items = wardrobe();
        let profile = StyleProfile {
            undertone: Some(Undertone::Cool),
            ..StyleProfile::default()
        };
        let keywords = styler_keywords(&profile);

        let picks = pick_wardrobe_matches(items.as_slice(), OWNER, &keywords, MatchContext::PersonalStyler)
            .await
            .unwrap();
        assert_eq!(ids(&picks), vec![10, 7, 4, 1]);
    }

    #[tokio::test]
    async fn test_styler_falls_back_when_nothing_matches() {
        let items = wardrobe();
        let picks = pick_wardrobe_matches(
            items.as_slice(),
            OWNER,
            &["sequin"],
            MatchContext::PersonalStyler,
        )
        .await
        .unwrap();
        assert_eq!(ids(&picks), vec![10, 9, 8, 7, 6, 5]);
    }

    #[tokio::test]
    async fn test_colour_analysis_has_no_fallback() {
        let items = wardrobe();
        let picks = pick_wardrobe_matches(
            items.as_slice(),
            OWNER,
            &["lavender", "mint"],
            MatchContext::ColourAnalysis,
        )
        .await
        .unwrap();
        assert!(picks.is_empty());

        let picks = pick_wardrobe_matches(items.as_slice(), OWNER, &[], MatchContext::ColourAnalysis)
            .await
            .unwrap();
        assert!(picks.is_empty());
    }

    #[tokio::test]
    async fn test_colour_analysis_caps_at_eight() {
        let items: Vec<WardrobeItem> = (1..=12).map(|id| item(id, OWNER, "Top", Some("Brown"))).collect();
        let analysis = classify_season(&StyleProfile {
            undertone: Some(Undertone::Warm),
            ..StyleProfile::default()
        });

        let picks = pick_wardrobe_matches(
            items.as_slice(),
            OWNER,
            analysis.color_keywords,
            MatchContext::ColourAnalysis,
        )
        .await
        .unwrap();
        assert_eq!(ids(&picks), vec![12, 11, 10, 9, 8, 7, 6, 5]);
    }

    #[tokio::test]
    async fn test_occasion_keywords_match_category_and_notes() {
        let mut items = wardrobe();
        items[5].notes = Some("White sneakers".to_owned());
        let profile = StyleProfile {
            occasion: Some(Occasion::Work),
            ..StyleProfile::default()
        };

        let picks = pick_wardrobe_matches(
            items.as_slice(),
            OWNER,
            &styler_keywords(&profile),
            MatchContext::PersonalStyler,
        )
        .await
        .unwrap();
        assert_eq!(ids(&picks), vec![3]);

        let casual = StyleProfile {
            occasion: Some(Occasion::Casual),
            ..StyleProfile::default()
        };
        let picks = pick_wardrobe_matches(
            items.as_slice(),
            OWNER,
            &styler_keywords(&casual),
            MatchContext::PersonalStyler,
        )
        .await
        .unwrap();
        assert_eq!(ids(&picks), vec![6]);
    }

    #[tokio::test]
    async fn test_other_users_items_are_never_returned() {
        let items = wardrobe();
        let picks = pick_wardrobe_matches(
            items.as_slice(),
            UserId::new(2),
            &["navy"],
            MatchContext::ColourAnalysis,
        )
        .await
        .unwrap();
        assert_eq!(ids(&picks), vec![11]);

        let picks = pick_wardrobe_matches(items.as_slice(), UserId::new(3), &[], MatchContext::PersonalStyler)
            .await
            .unwrap();
        assert!(picks.is_empty());
    }

    #[test]
    fn test_ties_break_by_descending_id() {
        let mut items = wardrobe();
        let stamp = items[0].created_at;
        for it in &mut items {
            it.created_at = stamp;
        }
        let picked = newest_first(&items, OWNER, |_| true, 3);
        assert_eq!(ids(&picked), vec![10, 9, 8]);
    }
}
