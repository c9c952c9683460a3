//! Orientation correction for captured photos.
//!
//! Two independent corrections are composed: the buffer's own orientation
//! metadata is normalized to upright first, then the capture-time rotation
//! is applied on top.

use image::DynamicImage;

use crate::models::error::SessionError;
use crate::models::orientation::{CaptureOrientation, ImageOrientation};
use crate::processing::orientation_mapper;

/// Decode encoded photo data (PNG or JPEG) into pixels.
pub fn decode(data: &[u8]) -> Result<DynamicImage, SessionError> {
    if data.is_empty() {
        return Err(SessionError::DecodeFailed("empty photo data".into()));
    }
    image::load_from_memory(data).map_err(|e| SessionError::DecodeFailed(e.to_string()))
}

/// Redraw `image` so its pixels are upright, given the buffer's metadata.
pub fn normalize(image: DynamicImage, orientation: ImageOrientation) -> DynamicImage {
    match orientation {
        ImageOrientation::Up => image,
        ImageOrientation::UpMirrored => image.fliph(),
        ImageOrientation::Down => image.rotate180(),
        ImageOrientation::DownMirrored => image.flipv(),
        ImageOrientation::Right => image.rotate90(),
        ImageOrientation::Left => image.rotate270(),
        // transpose
        ImageOrientation::LeftMirrored => image.rotate90().fliph(),
        // transverse
        ImageOrientation::RightMirrored => image.rotate270().fliph(),
    }
}

/// Rotate by a quarter-turn multiple of `degrees`, positive clockwise.
pub fn rotate(image: DynamicImage, degrees: i32) -> DynamicImage {
    match degrees.rem_euclid(360) {
        0 => image,
        90 => image.rotate90(),
        180 => image.rotate180(),
        270 => image.rotate270(),
        other => {
            log::warn!("Ignoring non quarter-turn rotation of {} degrees", other);
            image
        }
    }
}

/// Decode, normalize, then rotate for the capture-time orientation.
///
/// Returns the upright image and the rotation that was applied.
pub fn correct(
    data: &[u8],
    source: ImageOrientation,
    capture: CaptureOrientation,
) -> Result<(DynamicImage, i32), SessionError> {
    let decoded = decode(data)?;
    let upright = normalize(decoded, source);
    let degrees = orientation_mapper::capture_rotation(capture);
    Ok((rotate(upright, degrees), degrees))
}
