//! crates/print_catalog_core/src/camera.rs
//!
//! Scoped camera access. A `CameraSession` owns a running `VideoStream` and
//! stops it exactly once, whether the session ends in a capture, a cancel, a
//! failed capture, or is simply dropped.

use std::io::Cursor;

use chrono::Utc;
use image::{DynamicImage, ImageFormat, RgbImage};
use tracing::{debug, info};

use crate::domain::ImageFile;
use crate::ports::{CameraDevice, Frame, PortError, PortResult, VideoStream};

pub struct CameraSession<S: VideoStream> {
    stream: Option<S>,
}

impl<S: VideoStream> CameraSession<S> {
    /// Starts the device and wraps its stream.
    pub fn open<D>(device: &D) -> PortResult<Self>
    where
        D: CameraDevice<Stream = S>,
    {
        let stream = device.start()?;
        info!("Camera stream started");
        Ok(Self {
            stream: Some(stream),
        })
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Grabs the current frame as a JPEG image and releases the camera.
    pub fn capture(mut self) -> PortResult<ImageFile> {
        let mut stream = self
            .stream
            .take()
            .ok_or_else(|| PortError::Unexpected("camera session already closed".to_string()))?;
        let frame = stream.current_frame();
        stream.stop();
        debug!("Camera stream stopped after capture");

        let bytes = encode_jpeg(&frame?)?;
        let name = format!("camera-{}.jpg", Utc::now().timestamp_millis());
        Ok(ImageFile::new(name, "image/jpeg", bytes))
    }

    /// Releases the camera without capturing.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("Camera stream stopped");
        }
    }
}

impl<S: VideoStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Rasterizes an RGB frame into JPEG bytes.
pub fn encode_jpeg(frame: &Frame) -> PortResult<Vec<u8>> {
    let image = RgbImage::from_raw(frame.width, frame.height, frame.rgb.clone()).ok_or_else(|| {
        PortError::Unexpected(format!(
            "frame of {} bytes does not fit {}x{} RGB",
            frame.rgb.len(),
            frame.width,
            frame.height
        ))
    })?;

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .map_err(|e| PortError::Unexpected(format!("JPEG encoding failed: {}", e)))?;
    Ok(bytes)
}
