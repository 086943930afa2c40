//! Image upload handling.
//!
//! Accepts at most one image per product-creation request, validates the
//! MIME type and size, and writes the file under a collision-resistant
//! generated name so concurrent uploads never clobber each other.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted upload size: 2 MiB.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Maximum length of a preserved file extension.
const MAX_EXTENSION_LENGTH: usize = 8;

/// Errors from the upload handler.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file is not an image.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The file exceeds [`MAX_UPLOAD_BYTES`].
    #[error("file exceeds the {MAX_UPLOAD_BYTES} byte limit")]
    TooLarge,

    /// Writing the file to the upload directory failed.
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores validated image uploads in a fixed directory.
#[derive(Debug, Clone)]
pub struct UploadService {
    dir: PathBuf,
}

impl UploadService {
    /// Create an upload service writing into `dir`.
    ///
    /// The directory is created lazily on first accepted upload.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The upload directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist one uploaded file.
    ///
    /// Returns the generated filename to reference from the product row.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::UnsupportedMediaType` if the content type does
    /// not start with `image/`, `UploadError::TooLarge` if the data exceeds
    /// 2 MiB, and `UploadError::Io` if the write fails.
    pub async fn store(
        &self,
        content_type: Option<&str>,
        original_name: Option<&str>,
        data: &[u8],
    ) -> Result<String, UploadError> {
        let content_type = content_type.unwrap_or("application/octet-stream");
        if !content_type.starts_with("image/") {
            return Err(UploadError::UnsupportedMediaType(content_type.to_owned()));
        }

        if data.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge);
        }

        let filename = generate_filename(original_name);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&filename), data).await?;

        Ok(filename)
    }
}

/// Generate a collision-resistant filename, keeping a sanitized version of
/// the original extension so browsers infer the right type when the file
/// is served back.
fn generate_filename(original_name: Option<&str>) -> String {
    let token = Uuid::new_v4().simple().to_string();

    match original_name.and_then(sanitized_extension) {
        Some(ext) => format!("{token}.{ext}"),
        None => token,
    }
}

/// Extract a safe, lowercased extension from a client-supplied filename.
///
/// Anything that is not short plain ASCII alphanumeric is discarded; the
/// client controls this string.
fn sanitized_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LENGTH
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_extension() {
        assert_eq!(sanitized_extension("ring.PNG"), Some("png".to_owned()));
        assert_eq!(sanitized_extension("photo.jpeg"), Some("jpeg".to_owned()));
        assert_eq!(sanitized_extension("no-extension"), None);
        assert_eq!(sanitized_extension("weird.p/ng"), None);
        assert_eq!(sanitized_extension("dots..."), None);
        assert_eq!(sanitized_extension("long.extension12345"), None);
    }

    #[test]
    fn test_generated_filenames_are_unique() {
        let a = generate_filename(Some("ring.png"));
        let b = generate_filename(Some("ring.png"));
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().join("uploads"));

        let filename = service
            .store(Some("image/png"), Some("ring.png"), b"fake png bytes")
            .await
            .unwrap();

        assert!(filename.ends_with(".png"));
        let stored = std::fs::read(dir.path().join("uploads").join(&filename)).unwrap();
        assert_eq!(stored, b"fake png bytes");
    }

    #[tokio::test]
    async fn test_store_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().to_path_buf());

        let err = service
            .store(Some("text/plain"), Some("notes.txt"), b"hello")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedMediaType(_)));

        // Missing content type is also rejected
        let err = service.store(None, Some("ring.png"), b"hello").await.unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn test_store_rejects_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().to_path_buf());

        let big = vec![0_u8; MAX_UPLOAD_BYTES + 1];
        let err = service
            .store(Some("image/png"), Some("big.png"), &big)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge));
    }

    #[tokio::test]
    async fn test_store_accepts_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path().to_path_buf());

        let exact = vec![0_u8; MAX_UPLOAD_BYTES];
        assert!(
            service
                .store(Some("image/png"), Some("exact.png"), &exact)
                .await
                .is_ok()
        );
    }
}
