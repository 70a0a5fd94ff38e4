//! services/catalog/src/adapters/image_picker.rs
//!
//! Picks an image file from disk. The size limit is checked against the file
//! metadata before any bytes are read.

use std::path::{Path, PathBuf};

use print_catalog_core::{validate_image, ImageFile, ValidationError};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Guesses an image MIME type from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Reads `path` as an `ImageFile`, rejecting non-images and files over `limit` bytes.
pub async fn pick_image(path: &Path, limit: u64) -> Result<ImageFile, PickError> {
    let io_err = |source| PickError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
    if metadata.len() > limit {
        return Err(ValidationError::ImageTooLarge {
            size: metadata.len(),
            limit,
        }
        .into());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_type_for(path);
    if !mime_type.starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            name,
            mime_type: mime_type.to_string(),
        }
        .into());
    }

    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    let image = ImageFile::new(name, mime_type, bytes);
    validate_image(&image, limit)?;

    debug!(file = %image.name, bytes = image.size(), "Image picked");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(mime_type_for(Path::new("scan.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a/b/page.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_type_for(Path::new("no_extension")), "application/octet-stream");
    }

    #[tokio::test]
    async fn picks_small_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let image = pick_image(&path, 10).await.unwrap();

        assert_eq!(image.name, "page.png");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("poster.jpg");
        std::fs::write(&path, vec![0u8; 11]).unwrap();

        let err = pick_image(&path, 10).await.unwrap_err();

        assert!(matches!(
            err,
            PickError::Validation(ValidationError::ImageTooLarge { size: 11, limit: 10 })
        ));
    }

    #[tokio::test]
    async fn rejects_non_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hi").unwrap();

        let err = pick_image(&path, 10).await.unwrap_err();

        assert!(matches!(err, PickError::Validation(ValidationError::NotAnImage { .. })));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = pick_image(&dir.path().join("gone.png"), 10).await.unwrap_err();
        assert!(matches!(err, PickError::Io { .. }));
    }
}
