//! Wardrobe photo storage.
//!
//! Photos are written to the configured upload directory and served from
//! `/uploads/<file>`. File names carry the owner's ID and the upload time so
//! two users (or two uploads of `IMG_0001.jpg`) never collide:
//!
//! ```text
//! {user_id}_{sanitized base}_{unix seconds}.{lowercased ext}
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use glamdiva_core::UserId;

/// Image extensions accepted for wardrobe photos.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// URL prefix uploaded files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads/";

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file extension isn't an allowed image type.
    #[error("unsupported image format: {0:?}")]
    UnsupportedType(String),

    /// Writing the file failed.
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores and removes uploaded wardrobe photos.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory files are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an uploaded photo and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsupportedType` for a non-image extension and
    /// `UploadError::Io` if the file can't be written.
    pub async fn save(
        &self,
        owner: UserId,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let file_name = stored_file_name(owner, original_name, Utc::now().timestamp())?;

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        tracing::info!(user_id = %owner, file = %file_name, size = bytes.len(), "Stored wardrobe photo");

        Ok(format!("{PUBLIC_PREFIX}{file_name}"))
    }

    /// Delete the file behind a public URL, if it is one of ours.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn remove(&self, public_url: &str) {
        let Some(file_name) = file_name_from_url(public_url) else {
            tracing::warn!(url = %public_url, "Not an upload URL, leaving file alone");
            return;
        };

        match tokio::fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => tracing::debug!(file = %file_name, "Removed wardrobe photo"),
            Err(e) => tracing::warn!(file = %file_name, error = %e, "Failed to remove wardrobe photo"),
        }
    }
}

/// Lowercased extension of `file_name` if it is an allowed image type.
#[must_use]
pub fn allowed_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Build the stored name for an upload.
///
/// # Errors
///
/// Returns `UploadError::UnsupportedType` if the extension isn't allowed.
pub fn stored_file_name(
    owner: UserId,
    original_name: &str,
    unix_seconds: i64,
) -> Result<String, UploadError> {
    let ext = allowed_extension(original_name)
        .ok_or_else(|| UploadError::UnsupportedType(original_name.to_owned()))?;

    // Browsers may send a full client path.
    let leaf = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    let stem = leaf.rsplit_once('.').map_or(leaf, |(stem, _)| stem);

    let mut base = sanitize(stem);
    if base.is_empty() {
        base.push_str("photo");
    }

    Ok(format!("{owner}_{base}_{unix_seconds}.{ext}"))
}

/// Keep ASCII alphanumerics, `-`, `_` and `.`; whitespace becomes `_`.
fn sanitize(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();

    cleaned.trim_matches(|c| c == '.' || c == '_').to_owned()
}

/// The file name inside a `/uploads/...` URL, rejecting anything path-like.
fn file_name_from_url(url: &str) -> Option<&str> {
    let name = url.strip_prefix(PUBLIC_PREFIX)?;
    let is_plain = !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.');
    is_plain.then_some(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const OWNER: UserId = UserId::new(3);

    #[test]
    fn test_allowed_extension_is_case_insensitive() {
        assert_eq!(allowed_extension("Top.JPG").as_deref(), Some("jpg"));
        assert_eq!(allowed_extension("a.b.webp").as_deref(), Some("webp"));
        assert_eq!(allowed_extension("notes.pdf"), None);
        assert_eq!(allowed_extension("png"), None);
    }

    #[test]
    fn test_stored_file_name_format() {
        let name = stored_file_name(OWNER, "Blue Top.JPG", 1_700_000_000).unwrap();
        assert_eq!(name, "3_Blue_Top_1700000000.jpg");
    }

    #[test]
    fn test_stored_file_name_strips_paths_and_symbols() {
        let name = stored_file_name(OWNER, r"C:\Users\me\../sáree (1).png", 5).unwrap();
        assert_eq!(name, "3_sree_1_5.png");

        let name = stored_file_name(OWNER, "../../etc/passwd.gif", 5).unwrap();
        assert_eq!(name, "3_passwd_5.gif");
    }

    #[test]
    fn test_stored_file_name_falls_back_when_base_is_empty() {
        assert_eq!(stored_file_name(OWNER, "★★.webp", 9).unwrap(), "3_photo_9.webp");
    }

    #[test]
    fn test_stored_file_name_rejects_unsupported_type() {
        let err = stored_file_name(OWNER, "malware.exe", 1).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(file_name_from_url("/uploads/3_top_1.jpg"), Some("3_top_1.jpg"));
        assert_eq!(file_name_from_url("/uploads/../secret"), None);
        assert_eq!(file_name_from_url("/static/css/main.css"), None);
        assert_eq!(file_name_from_url("/uploads/"), None);
    }

    #[tokio::test]
    async fn test_save_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("uploads"));

        let url = store.save(OWNER, "dress.png", b"not really a png").await.unwrap();
        assert!(url.starts_with("/uploads/3_dress_"));
        assert!(url.ends_with(".png"));

        let path = store.dir().join(file_name_from_url(&url).unwrap());
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"not really a png");

        store.remove(&url).await;
        assert!(!path.exists());

        // Removing again only logs.
        store.remove(&url).await;
    }
}
