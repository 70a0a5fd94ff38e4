//! crates/print_catalog_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the catalog's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of where prints are stored, how images are encoded and
//! which camera hardware is attached.

use async_trait::async_trait;
use crate::domain::ImageFile;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., filesystem, camera).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string key-value store, the shape of a browser's local storage.
///
/// Calls are synchronous; implementations are expected to be fast and local.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` when the key is absent.
    fn get_item(&self, key: &str) -> PortResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> PortResult<()>;
}

#[async_trait]
pub trait ImageEncoder: Send + Sync {
    /// Encodes an image into a self-contained data URI.
    async fn encode_data_url(&self, image: &ImageFile) -> PortResult<String>;
}

/// A single RGB frame grabbed from a video stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB8 pixels, `width * height * 3` bytes.
    pub rgb: Vec<u8>,
}

/// A live video stream holding a hardware resource until stopped.
pub trait VideoStream: Send {
    fn current_frame(&mut self) -> PortResult<Frame>;

    /// Releases the underlying device.
    fn stop(&mut self);
}

pub trait CameraDevice {
    type Stream: VideoStream;

    /// Acquires the camera and starts streaming.
    fn start(&self) -> PortResult<Self::Stream>;
}
