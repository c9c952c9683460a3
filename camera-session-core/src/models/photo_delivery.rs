use uuid::Uuid;

use super::config::FlashMode;
use super::orientation::ImageOrientation;

/// How a backend hands finished photos back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryTier {
    /// One callback carrying the encoded file representation.
    Modern,
    /// One callback carrying separate full-resolution and preview buffers.
    Legacy,
}

/// Pixel format and size of the thumbnail delivered with a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewFormat {
    pub pixel_format: u32,
    pub width: u32,
    pub height: u32,
}

/// Settings passed to the backend with a single photo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSettings {
    pub request_id: Uuid,
    pub flash_mode: FlashMode,
    pub high_resolution: bool,
    pub auto_still_image_stabilization: bool,
    pub preview_format: Option<PreviewFormat>,
}

/// Encoded image data plus the orientation metadata of its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoBuffer {
    pub data: Vec<u8>,
    pub orientation: ImageOrientation,
}

/// A raw capture result as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoDelivery {
    /// Modern single-callback delivery. `file_data` is `None` when the
    /// backend failed to produce a file representation.
    Processed {
        file_data: Option<Vec<u8>>,
        orientation: ImageOrientation,
    },
    /// Legacy dual-buffer delivery.
    Buffers {
        full_resolution: Option<PhotoBuffer>,
        preview: Option<PhotoBuffer>,
    },
}

impl PhotoDelivery {
    pub fn tier(&self) -> DeliveryTier {
        match self {
            Self::Processed { .. } => DeliveryTier::Modern,
            Self::Buffers { .. } => DeliveryTier::Legacy,
        }
    }
}
