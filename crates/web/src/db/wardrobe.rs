//! Wardrobe repository.
//!
//! Every query is scoped to the owning user. The repository also backs the
//! style engine through [`WardrobeSource`], matching keywords in SQL with
//! `ILIKE ANY` over colour, notes and category.

use sqlx::PgPool;
use tracing::instrument;

use glamdiva_core::{UserId, WardrobeItem, WardrobeItemId, WardrobeSource};

use super::{RepositoryError, contains_pattern};

const ITEM_COLUMNS: &str = "id, user_id, name, category, color, notes, image_url, created_at";

/// Listing order for the wardrobe page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WardrobeSort {
    /// Most recently added first.
    #[default]
    Newest,
    /// Alphabetical by name.
    Name,
}

impl WardrobeSort {
    /// Parse the `sort` query parameter. Anything but `name` means newest first.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("name") => Self::Name,
            _ => Self::Newest,
        }
    }

    /// The query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Name => "name",
        }
    }

    const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC, id DESC",
            Self::Name => "name ASC, id ASC",
        }
    }
}

/// Search and filter options for [`WardrobeRepository::list`].
#[derive(Debug, Clone, Default)]
pub struct WardrobeFilter {
    /// Case-insensitive substring of the name or notes.
    pub query: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    pub sort: WardrobeSort,
}

/// Fields for a new wardrobe item.
#[derive(Debug, Clone)]
pub struct NewWardrobeItem {
    pub name: String,
    pub category: String,
    pub color: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

/// Repository for `glamdiva.wardrobe_item`.
pub struct WardrobeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WardrobeRepository<'a> {
    /// Create a new wardrobe repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add an item to a user's wardrobe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, item), fields(category = %item.category))]
    pub async fn create(
        &self,
        owner: UserId,
        item: &NewWardrobeItem,
    ) -> Result<WardrobeItem, RepositoryError> {
        let created = sqlx::query_as::<_, WardrobeItem>(&format!(
            r"
            INSERT INTO glamdiva.wardrobe_item (user_id, name, category, color, notes, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ITEM_COLUMNS}
            "
        ))
        .bind(owner)
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.color.as_deref())
        .bind(item.notes.as_deref())
        .bind(item.image_url.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// List a user's items with optional search, category filter and sort.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, filter))]
    pub async fn list(
        &self,
        owner: UserId,
        filter: &WardrobeFilter,
    ) -> Result<Vec<WardrobeItem>, RepositoryError> {
        let pattern = filter.query.as_deref().map(contains_pattern);

        let items = sqlx::query_as::<_, WardrobeItem>(&format!(
            r"
            SELECT {ITEM_COLUMNS}
            FROM glamdiva.wardrobe_item
            WHERE user_id = $1
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR name ILIKE $3 OR notes ILIKE $3)
            ORDER BY {}
            ",
            filter.sort.order_by()
        ))
        .bind(owner)
        .bind(filter.category.as_deref())
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Distinct categories a user has used, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn categories(&self, owner: UserId) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar(
            r"
            SELECT DISTINCT category
            FROM glamdiva.wardrobe_item
            WHERE user_id = $1
            ORDER BY category
            ",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Delete an item if `owner` owns it.
    ///
    /// Returns the deleted item, or `None` when it doesn't exist or belongs
    /// to someone else.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn delete_owned(
        &self,
        owner: UserId,
        id: WardrobeItemId,
    ) -> Result<Option<WardrobeItem>, RepositoryError> {
        let deleted = sqlx::query_as::<_, WardrobeItem>(&format!(
            r"
            DELETE FROM glamdiva.wardrobe_item
            WHERE id = $1 AND user_id = $2
            RETURNING {ITEM_COLUMNS}
            "
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(deleted)
    }
}

impl WardrobeSource for WardrobeRepository<'_> {
    type Error = RepositoryError;

    #[instrument(skip(self))]
    async fn recent_items(
        &self,
        owner: UserId,
        limit: usize,
    ) -> Result<Vec<WardrobeItem>, Self::Error> {
        let items = sqlx::query_as::<_, WardrobeItem>(&format!(
            r"
            SELECT {ITEM_COLUMNS}
            FROM glamdiva.wardrobe_item
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "
        ))
        .bind(owner)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    #[instrument(skip(self))]
    async fn items_matching(
        &self,
        owner: UserId,
        keywords: &[&str],
        limit: usize,
    ) -> Result<Vec<WardrobeItem>, Self::Error> {
        let patterns: Vec<String> = keywords.iter().map(|k| contains_pattern(k)).collect();

        let items = sqlx::query_as::<_, WardrobeItem>(&format!(
            r"
            SELECT {ITEM_COLUMNS}
            FROM glamdiva.wardrobe_item
            WHERE user_id = $1
              AND (color ILIKE ANY($2) OR notes ILIKE ANY($2) OR category ILIKE ANY($2))
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "
        ))
        .bind(owner)
        .bind(&patterns)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_param() {
        assert_eq!(WardrobeSort::from_param(Some("name")), WardrobeSort::Name);
        assert_eq!(WardrobeSort::from_param(Some("newest")), WardrobeSort::Newest);
        assert_eq!(WardrobeSort::from_param(Some("price")), WardrobeSort::Newest);
        assert_eq!(WardrobeSort::from_param(None), WardrobeSort::Newest);
        assert_eq!(WardrobeSort::Name.as_str(), "name");
    }

    #[test]
    fn test_sort_orders_are_stable() {
        assert!(WardrobeSort::Newest.order_by().ends_with("id DESC"));
        assert!(WardrobeSort::Name.order_by().starts_with("name ASC"));
    }
}
