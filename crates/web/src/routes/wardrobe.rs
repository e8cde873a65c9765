//! Wardrobe route handlers.
//!
//! Listing with search/filter/sort, adding items with an optional photo,
//! and deleting items. Every query is scoped to the logged-in user.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use glamdiva_core::{UserId, WardrobeItem, WardrobeItemId};

use crate::db::wardrobe::NewWardrobeItem;
use crate::db::{WardrobeFilter, WardrobeRepository, WardrobeSort};
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::services::uploads::{UploadError, allowed_extension};
use crate::state::AppState;

use super::{Flash, MessageQuery, non_blank};

/// Column widths of `glamdiva.wardrobe_item`, in characters.
const MAX_NAME_LEN: usize = 120;
const MAX_CATEGORY_LEN: usize = 80;
const MAX_COLOR_LEN: usize = 60;
const MAX_NOTES_LEN: usize = 255;

// =============================================================================
// Query Types
// =============================================================================

/// Wardrobe list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    fn to_filter(&self) -> WardrobeFilter {
        WardrobeFilter {
            query: non_blank(self.q.clone()),
            category: non_blank(self.category.clone()),
            sort: WardrobeSort::from_param(self.sort.as_deref()),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Wardrobe page template.
#[derive(Template, WebTemplate)]
#[template(path = "wardrobe.html")]
pub struct WardrobeTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash: Option<Flash>,
    pub items: Vec<WardrobeItem>,
    /// Distinct categories the user has, for the filter dropdown.
    pub categories: Vec<String>,
    pub q: String,
    pub category: String,
    pub sort: &'static str,
    pub max_upload_mb: usize,
}

// =============================================================================
// Form Parsing
// =============================================================================

/// An uploaded photo as received.
#[derive(Debug)]
pub struct Photo {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw fields of the add-item form.
#[derive(Debug, Default)]
pub struct ItemSubmission {
    pub name: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub notes: Option<String>,
    pub photo: Option<Photo>,
}

/// A submission that passed validation.
#[derive(Debug)]
pub struct ValidSubmission {
    pub name: String,
    pub category: String,
    pub color: Option<String>,
    pub notes: Option<String>,
    pub photo: Option<Photo>,
}

/// Read every field of the multipart form.
///
/// A file input left empty arrives with a blank file name and is ignored.
async fn read_submission(multipart: &mut Multipart) -> Result<ItemSubmission, MultipartError> {
    let mut submission = ItemSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };

        match field_name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().trim().to_owned();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() {
                    submission.photo = Some(Photo {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "name" => submission.name = Some(field.text().await?),
            "category" => submission.category = Some(field.text().await?),
            "color" => submission.color = Some(field.text().await?),
            "notes" => submission.notes = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(submission)
}

/// Check a submission, returning the message code on failure.
///
/// Name and category are checked before the photo type.
pub fn validate_submission(submission: ItemSubmission) -> Result<ValidSubmission, &'static str> {
    let (Some(name), Some(category)) = (non_blank(submission.name), non_blank(submission.category))
    else {
        return Err("item_required");
    };
    let color = non_blank(submission.color);
    let notes = non_blank(submission.notes);

    let too_long = name.chars().count() > MAX_NAME_LEN
        || category.chars().count() > MAX_CATEGORY_LEN
        || color.as_ref().is_some_and(|c| c.chars().count() > MAX_COLOR_LEN)
        || notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LEN);
    if too_long {
        return Err("item_too_long");
    }

    if let Some(photo) = &submission.photo
        && allowed_extension(&photo.file_name).is_none()
    {
        return Err("unsupported_image");
    }

    Ok(ValidSubmission {
        name,
        category,
        color,
        notes,
        photo: submission.photo,
    })
}

fn wardrobe_error(code: &str) -> Response {
    Redirect::to(&format!("/wardrobe?error={code}")).into_response()
}

// =============================================================================
// Routes
// =============================================================================

/// Display the wardrobe.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(messages): Query<MessageQuery>,
    Query(list): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = WardrobeRepository::new(state.pool());
    let filter = list.to_filter();

    let items = repo.list(user.id, &filter).await?;
    let categories = repo.categories(user.id).await?;

    tracing::debug!(items = items.len(), sort = filter.sort.as_str(), "Listed wardrobe");

    Ok(WardrobeTemplate {
        current_user: Some(user),
        flash: Flash::from_query(&messages),
        items,
        categories,
        q: filter.query.unwrap_or_default(),
        category: filter.category.unwrap_or_default(),
        sort: filter.sort.as_str(),
        max_upload_mb: state.config().max_upload_bytes / (1024 * 1024),
    })
}

/// Handle the add-item form.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Response {
    let submission = match read_submission(&mut multipart).await {
        Ok(submission) => submission,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!("Wardrobe upload over the size limit");
            return wardrobe_error("upload_too_large");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable wardrobe form");
            return wardrobe_error("bad_upload");
        }
    };

    let submission = match validate_submission(submission) {
        Ok(valid) => valid,
        Err(code) => return wardrobe_error(code),
    };

    match add_item(&state, user.id, submission).await {
        Ok(item) => {
            add_breadcrumb("wardrobe", "Added item", &[("category", &item.category)]);
            tracing::info!(item_id = %item.id, "Added wardrobe item");
            Redirect::to("/wardrobe?success=item_added").into_response()
        }
        Err(AppError::Upload(UploadError::UnsupportedType(_))) => wardrobe_error("unsupported_image"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to add wardrobe item");
            wardrobe_error("add_failed")
        }
    }
}

/// Store the photo (if any), then the row. The photo is removed again if the
/// insert fails.
async fn add_item(
    state: &AppState,
    owner: UserId,
    submission: ValidSubmission,
) -> Result<WardrobeItem, AppError> {
    let image_url = match &submission.photo {
        Some(photo) => Some(
            state
                .images()
                .save(owner, &photo.file_name, &photo.bytes)
                .await?,
        ),
        None => None,
    };

    let new_item = NewWardrobeItem {
        name: submission.name,
        category: submission.category,
        color: submission.color,
        notes: submission.notes,
        image_url,
    };

    match WardrobeRepository::new(state.pool()).create(owner, &new_item).await {
        Ok(item) => Ok(item),
        Err(e) => {
            if let Some(url) = &new_item.image_url {
                state.images().remove(url).await;
            }
            Err(e.into())
        }
    }
}

/// Delete one of the user's items and its photo.
#[instrument(skip_all, fields(user_id = %user.id, item_id = id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Response {
    let repo = WardrobeRepository::new(state.pool());

    match repo.delete_owned(user.id, WardrobeItemId::new(id)).await {
        Ok(Some(item)) => {
            if let Some(url) = &item.image_url {
                state.images().remove(url).await;
            }
            tracing::info!(item_id = %item.id, "Deleted wardrobe item");
            Redirect::to("/wardrobe?success=item_deleted").into_response()
        }
        Ok(None) => {
            tracing::warn!("Wardrobe item not found or not owned");
            wardrobe_error("item_not_found")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete wardrobe item");
            wardrobe_error("delete_failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, category: &str, photo: Option<&str>) -> ItemSubmission {
        ItemSubmission {
            name: Some(name.to_owned()),
            category: Some(category.to_owned()),
            color: Some("  ".to_owned()),
            notes: Some(" linen ".to_owned()),
            photo: photo.map(|file_name| Photo {
                file_name: file_name.to_owned(),
                bytes: vec![0xFF, 0xD8],
            }),
        }
    }

    #[test]
    fn test_valid_submission_is_trimmed() {
        let valid = validate_submission(submission(" Shirt ", "Top", Some("shirt.JPG")))
            .unwrap_or_else(|code| panic!("rejected: {code}"));
        assert_eq!(valid.name, "Shirt");
        assert_eq!(valid.category, "Top");
        assert_eq!(valid.color, None);
        assert_eq!(valid.notes.as_deref(), Some("linen"));
        assert!(valid.photo.is_some());
    }

    #[test]
    fn test_name_and_category_required() {
        assert_eq!(
            validate_submission(submission("", "Top", None)).err(),
            Some("item_required")
        );
        assert_eq!(
            validate_submission(submission("Shirt", "   ", None)).err(),
            Some("item_required")
        );
        assert_eq!(
            validate_submission(ItemSubmission::default()).err(),
            Some("item_required")
        );
    }

    #[test]
    fn test_missing_fields_reported_before_bad_photo() {
        assert_eq!(
            validate_submission(submission("", "", Some("virus.exe"))).err(),
            Some("item_required")
        );
    }

    #[test]
    fn test_unsupported_photo_rejected() {
        assert_eq!(
            validate_submission(submission("Shirt", "Top", Some("shirt.bmp"))).err(),
            Some("unsupported_image")
        );
        assert_eq!(
            validate_submission(submission("Shirt", "Top", Some("no-extension"))).err(),
            Some("unsupported_image")
        );
    }

    #[test]
    fn test_overlong_fields_rejected() {
        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            validate_submission(submission(&long_name, "Top", None)).err(),
            Some("item_too_long")
        );
    }

    #[test]
    fn test_list_query_to_filter() {
        let query = ListQuery {
            q: Some(" linen ".to_owned()),
            category: Some(String::new()),
            sort: Some("name".to_owned()),
        };
        let filter = query.to_filter();
        assert_eq!(filter.query.as_deref(), Some("linen"));
        assert_eq!(filter.category, None);
        assert_eq!(filter.sort, WardrobeSort::Name);

        assert_eq!(ListQuery::default().to_filter().sort, WardrobeSort::Newest);
    }
}
