use chrono::{DateTime, Utc};
use image::DynamicImage;
use uuid::Uuid;

use super::config::FlashMode;
use super::orientation::{CaptureOrientation, ImageOrientation};

/// A single photo request, with the orientation fixed at issue time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    pub id: Uuid,
    pub flash_mode: FlashMode,
    pub high_resolution: bool,
    pub preview_width: u32,
    pub preview_height: u32,
    /// Orientation snapshot used for the post-capture rotation.
    pub orientation: CaptureOrientation,
    pub issued_at: DateTime<Utc>,
}

/// An upright photo ready for the host.
#[derive(Debug, Clone)]
pub struct CorrectedImage {
    pub request_id: Uuid,
    pub image: DynamicImage,
    /// Orientation metadata of the pixels as delivered by the device.
    pub source_orientation: ImageOrientation,
    pub capture_orientation: CaptureOrientation,
    /// Rotation applied after normalization, in degrees (positive is clockwise).
    pub applied_rotation: i32,
    pub captured_at: DateTime<Utc>,
}

impl CorrectedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
