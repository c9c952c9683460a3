//! Synthetic sensor readout.
//!
//! The simulated scene is a dark frame with a red marker in its top-left
//! corner. The sensor stores it the way real hardware does: rotated or
//! mirrored, with orientation metadata describing how to get it upright.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use camera_session_core::models::orientation::ImageOrientation;

/// Color of the scene's orientation marker.
pub const MARKER: Rgb<u8> = Rgb([255, 0, 0]);

const BACKGROUND: Rgb<u8> = Rgb([16, 16, 16]);

/// The upright scene at `width` x `height`, marker at `(0, 0)`.
pub fn render_scene(width: u32, height: u32) -> RgbImage {
    let mut scene = RgbImage::from_pixel(width, height, BACKGROUND);
    scene.put_pixel(0, 0, MARKER);
    scene
}

/// Store an upright scene so that normalizing it with `orientation`
/// yields the scene again.
pub fn store(scene: RgbImage, orientation: ImageOrientation) -> DynamicImage {
    let image = DynamicImage::ImageRgb8(scene);
    match orientation {
        ImageOrientation::Up => image,
        ImageOrientation::UpMirrored => image.fliph(),
        ImageOrientation::Down => image.rotate180(),
        ImageOrientation::DownMirrored => image.flipv(),
        ImageOrientation::Right => image.rotate270(),
        ImageOrientation::Left => image.rotate90(),
        ImageOrientation::LeftMirrored => image.fliph().rotate270(),
        ImageOrientation::RightMirrored => image.fliph().rotate90(),
    }
}

/// PNG-encode a sensor readout.
pub fn encode(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Location of the marker pixel, if present.
pub fn find_marker(image: &DynamicImage) -> Option<(u32, u32)> {
    image
        .to_rgb8()
        .enumerate_pixels()
        .find(|(_, _, pixel)| **pixel == MARKER)
        .map(|(x, y, _)| (x, y))
}
