use std::path::{Path, PathBuf};

use mime::Mime;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::utils::time::current_timestamp_millis;

/// Upload types become directory names under the upload root.
static UPLOAD_TYPE_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").ok());

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    /// Public URL path, `/uploads/<type>/<file>`.
    pub image_path: String,
    pub filename: String,
}

pub struct UploadService<'a> {
    upload_dir: &'a Path,
}

impl<'a> UploadService<'a> {
    pub fn new(upload_dir: &'a Path) -> Self {
        UploadService { upload_dir }
    }

    /// Write an already size-checked image under `<upload_dir>/<type>/`.
    pub async fn save_image(
        &self,
        upload_type: &str,
        original_filename: Option<&str>,
        data: &[u8],
    ) -> AppResult<StoredImage> {
        validate_upload_type(upload_type)?;

        let dir: PathBuf = self.upload_dir.join(upload_type);
        tokio::fs::create_dir_all(&dir).await?;

        let filename = generate_filename(original_filename);
        tokio::fs::write(dir.join(&filename), data).await?;

        tracing::info!("Stored {} image {} ({} bytes)", upload_type, filename, data.len());

        Ok(StoredImage {
            image_path: format!("/uploads/{}/{}", upload_type, filename),
            filename,
        })
    }

    /// Best-effort removal of an image written by `save_image`.
    pub async fn remove_image(&self, upload_type: &str, filename: &str) {
        let path = self.upload_dir.join(upload_type).join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}

pub fn validate_upload_type(upload_type: &str) -> AppResult<()> {
    let valid = UPLOAD_TYPE_PATTERN
        .as_ref()
        .map(|pattern| pattern.is_match(upload_type))
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid upload type '{}'",
            upload_type
        )))
    }
}

pub fn is_image(content_type: Option<&Mime>) -> bool {
    content_type
        .map(|mime| mime.type_() == mime::IMAGE)
        .unwrap_or(false)
}

/// `image-<unix millis>-<random>` plus the original extension, lower-cased.
pub fn generate_filename(original_filename: Option<&str>) -> String {
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);

    let extension = original_filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();

    format!(
        "image-{}-{}{}",
        current_timestamp_millis(),
        suffix,
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_type_pattern() {
        assert!(validate_upload_type("hero").is_ok());
        assert!(validate_upload_type("photo-carousel").is_ok());
        assert!(validate_upload_type("team_2").is_ok());
        assert!(validate_upload_type("").is_err());
        assert!(validate_upload_type("../etc").is_err());
        assert!(validate_upload_type("a/b").is_err());
        assert!(validate_upload_type(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Some(&mime::IMAGE_PNG)));
        assert!(is_image(Some(&"image/webp".parse::<Mime>().unwrap())));
        assert!(!is_image(Some(&mime::TEXT_PLAIN)));
        assert!(!is_image(Some(&mime::APPLICATION_OCTET_STREAM)));
        assert!(!is_image(None));
    }

    #[test]
    fn test_generate_filename_keeps_lowercased_extension() {
        let name = generate_filename(Some("Portrait.JPG"));
        assert!(name.starts_with("image-"));
        assert!(name.ends_with(".jpg"));

        let parts: Vec<&str> = name.trim_end_matches(".jpg").split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert!(parts[2].parse::<u32>().unwrap() < 1_000_000_000);

        assert!(!generate_filename(None).contains('.'));
        assert!(!generate_filename(Some("noext")).contains('.'));
    }

    #[actix_web::test]
    async fn test_save_image_writes_under_type_dir() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path());

        let stored = service
            .save_image("hero", Some("banner.png"), b"\x89PNG")
            .await
            .unwrap();

        assert_eq!(stored.image_path, format!("/uploads/hero/{}", stored.filename));
        let written = std::fs::read(dir.path().join("hero").join(&stored.filename)).unwrap();
        assert_eq!(written, b"\x89PNG");

        assert!(service.save_image("../up", None, b"x").await.is_err());
    }
}
