//! Wardrobe item type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{UserId, WardrobeItemId};

/// A clothing item in a user's wardrobe.
///
/// Items are never edited in place; `created_at` is set by the store on
/// insert and drives every "most recent first" ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct WardrobeItem {
    pub id: WardrobeItemId,
    /// Owner. Every read and delete is filtered by this.
    pub user_id: UserId,
    pub name: String,
    /// e.g. "Top", "Bottom", "Dress".
    pub category: String,
    /// e.g. "Navy Blue".
    pub color: Option<String>,
    pub notes: Option<String>,
    /// Public path of the uploaded photo, e.g. `/uploads/3_top_1700000000.jpg`.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WardrobeItem {
    /// Whether any keyword appears in the item's colour, notes or category.
    ///
    /// Case-insensitive substring match; an empty keyword list never matches.
    #[must_use]
    pub fn matches_any<K: AsRef<str>>(&self, keywords: &[K]) -> bool {
        let fields: Vec<String> = [
            self.color.as_deref(),
            self.notes.as_deref(),
            Some(self.category.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect();

        keywords.iter().any(|keyword| {
            let keyword = keyword.as_ref().to_lowercase();
            fields.iter().any(|field| field.contains(&keyword))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn item(category: &str, color: Option<&str>, notes: Option<&str>) -> WardrobeItem {
        WardrobeItem {
            id: WardrobeItemId::new(1),
            user_id: UserId::new(1),
            name: "Test".to_owned(),
            category: category.to_owned(),
            color: color.map(str::to_owned),
            notes: notes.map(str::to_owned),
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_matches_color_case_insensitively() {
        assert!(item("Top", Some("Navy Blue"), None).matches_any(&["navy"]));
    }

    #[test]
    fn test_matches_notes_and_category() {
        assert!(item("Top", None, Some("Office shirt")).matches_any(&["office"]));
        assert!(item("Blazer", None, None).matches_any(&["blazer"]));
    }

    #[test]
    fn test_name_is_not_searched() {
        let mut it = item("Top", None, None);
        it.name = "Emerald silk".to_owned();
        assert!(!it.matches_any(&["emerald"]));
    }

    #[test]
    fn test_no_keywords_never_match() {
        let none: [&str; 0] = [];
        assert!(!item("Top", Some("white"), None).matches_any(&none));
    }
}
