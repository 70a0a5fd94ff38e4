//! crates/print_catalog_core/src/domain.rs
//!
//! Defines the pure, core data structures for the catalog.
//! These structs are independent of the storage backend and its serialization format.

use chrono::{DateTime, Utc};

/// A single catalogued document: a photographed or scanned print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Print {
    pub id: String,
    /// Data URI holding the encoded image, e.g. `data:image/jpeg;base64,...`.
    pub image_url: String,
    pub title: String,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A print that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrint {
    pub image_url: String,
    pub title: String,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl NewPrint {
    pub fn with_id(self, id: String) -> Print {
        Print {
            id,
            image_url: self.image_url,
            title: self.title,
            labels: self.labels,
            created_at: self.created_at,
        }
    }
}

/// An image picked from disk or captured from a camera, before encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size of the raw image in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
