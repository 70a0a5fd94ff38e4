//! crates/print_catalog_core/src/draft.rs
//!
//! The user's not-yet-submitted input for a new print, and the checks it
//! must pass before anything is persisted.

use crate::domain::ImageFile;

/// Largest accepted image, 5 MiB.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// A validation failure, worded for the person filling in the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("An image is required")]
    MissingImage,
    #[error("A title is required")]
    MissingTitle,
    #[error("Image must be {limit} bytes or smaller (got {size} bytes)")]
    ImageTooLarge { size: u64, limit: u64 },
    #[error("'{name}' is not an image ({mime_type})")]
    NotAnImage { name: String, mime_type: String },
}

/// Checks a picked or captured image against the size limit and type.
pub fn validate_image(image: &ImageFile, limit: u64) -> Result<(), ValidationError> {
    if !image.is_image() {
        return Err(ValidationError::NotAnImage {
            name: image.name.clone(),
            mime_type: image.mime_type.clone(),
        });
    }
    if image.size() > limit {
        return Err(ValidationError::ImageTooLarge {
            size: image.size(),
            limit,
        });
    }
    Ok(())
}

/// Splits comma-separated label input, trimming pieces and dropping empty ones.
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintDraft {
    pub title: String,
    /// Comma-separated labels as typed.
    pub labels: String,
    pub image: Option<ImageFile>,
}

/// A draft that passed validation, ready for encoding and storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub labels: Vec<String>,
    pub image: ImageFile,
}

impl PrintDraft {
    pub fn new(title: impl Into<String>, labels: impl Into<String>, image: Option<ImageFile>) -> Self {
        Self {
            title: title.into(),
            labels: labels.into(),
            image,
        }
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self, uploading: bool) -> bool {
        self.image.is_some() && !self.title.trim().is_empty() && !uploading
    }

    pub fn validate(&self, max_image_bytes: u64) -> Result<ValidDraft, ValidationError> {
        let image = self.image.as_ref().ok_or(ValidationError::MissingImage)?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        validate_image(image, max_image_bytes)?;

        Ok(ValidDraft {
            title: self.title.clone(),
            labels: parse_labels(&self.labels),
            image: image.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(size: usize) -> ImageFile {
        ImageFile::new("scan.png", "image/png", vec![0u8; size])
    }

    #[test]
    fn labels_are_trimmed_and_empty_pieces_dropped() {
        assert_eq!(parse_labels(" school, 4月 ,, 提出物 ,"), vec!["school", "4月", "提出物"]);
        assert!(parse_labels("").is_empty());
        assert!(parse_labels(" , ,").is_empty());
    }

    #[test]
    fn labels_keep_duplicates_and_case() {
        assert_eq!(parse_labels("Tax,tax,Tax"), vec!["Tax", "tax", "Tax"]);
    }

    #[test]
    fn image_at_limit_is_accepted() {
        assert_eq!(validate_image(&png(16), 16), Ok(()));
    }

    #[test]
    fn image_over_limit_is_rejected() {
        assert_eq!(
            validate_image(&png(17), 16),
            Err(ValidationError::ImageTooLarge { size: 17, limit: 16 })
        );
    }

    #[test]
    fn non_image_is_rejected() {
        let pdf = ImageFile::new("doc.pdf", "application/pdf", vec![1, 2, 3]);
        assert!(matches!(
            validate_image(&pdf, MAX_IMAGE_BYTES),
            Err(ValidationError::NotAnImage { .. })
        ));
    }

    #[test]
    fn draft_requires_image_and_title() {
        let draft = PrintDraft::new("Math HW", "", None);
        assert_eq!(draft.validate(MAX_IMAGE_BYTES), Err(ValidationError::MissingImage));
        assert!(!draft.can_submit(false));

        let draft = PrintDraft::new("   ", "", Some(png(4)));
        assert_eq!(draft.validate(MAX_IMAGE_BYTES), Err(ValidationError::MissingTitle));
        assert!(!draft.can_submit(false));
    }

    #[test]
    fn valid_draft_keeps_title_as_entered() {
        let draft = PrintDraft::new(" Math HW ", "school, april", Some(png(4)));
        let valid = draft.validate(MAX_IMAGE_BYTES).unwrap();
        assert_eq!(valid.title, " Math HW ");
        assert_eq!(valid.labels, vec!["school", "april"]);
        assert_eq!(valid.image, png(4));
    }

    #[test]
    fn submit_disabled_while_uploading() {
        let draft = PrintDraft::new("Math HW", "", Some(png(4)));
        assert!(draft.can_submit(false));
        assert!(!draft.can_submit(true));
    }

    #[test]
    fn five_mebibyte_default_limit() {
        assert_eq!(MAX_IMAGE_BYTES, 5_242_880);
    }
}
