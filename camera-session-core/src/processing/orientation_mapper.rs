//! Pure orientation lookups: UI/device state to capture orientation, and
//! capture orientation to the correction applied to finished photos.

use crate::models::orientation::{
    CaptureOrientation, DeviceOrientation, ImageOrientation, InterfaceOrientation,
};

/// Resolve the capture orientation for the current UI and device state.
///
/// The interface orientation wins. When it is unknown the physical device
/// orientation is used, with its landscape sides swapped; flat or unknown
/// device orientations fall back to portrait.
pub fn to_capture_orientation(
    interface: InterfaceOrientation,
    device: DeviceOrientation,
) -> CaptureOrientation {
    match interface {
        InterfaceOrientation::Portrait => CaptureOrientation::Portrait,
        InterfaceOrientation::PortraitUpsideDown => CaptureOrientation::PortraitUpsideDown,
        InterfaceOrientation::LandscapeLeft => CaptureOrientation::LandscapeLeft,
        InterfaceOrientation::LandscapeRight => CaptureOrientation::LandscapeRight,
        InterfaceOrientation::Unknown => from_device_orientation(device),
    }
}

fn from_device_orientation(device: DeviceOrientation) -> CaptureOrientation {
    match device {
        DeviceOrientation::Portrait => CaptureOrientation::Portrait,
        DeviceOrientation::PortraitUpsideDown => CaptureOrientation::PortraitUpsideDown,
        DeviceOrientation::LandscapeLeft => CaptureOrientation::LandscapeRight,
        DeviceOrientation::LandscapeRight => CaptureOrientation::LandscapeLeft,
        DeviceOrientation::FaceUp | DeviceOrientation::FaceDown | DeviceOrientation::Unknown => {
            CaptureOrientation::Portrait
        }
    }
}

/// Image orientation that corrects a photo taken at `orientation`.
pub fn correction_orientation(orientation: CaptureOrientation) -> ImageOrientation {
    match orientation {
        CaptureOrientation::Portrait => ImageOrientation::Up,
        CaptureOrientation::PortraitUpsideDown => ImageOrientation::Down,
        CaptureOrientation::LandscapeLeft => ImageOrientation::Left,
        CaptureOrientation::LandscapeRight => ImageOrientation::Right,
    }
}

/// Rotation in degrees, positive clockwise, for a correction orientation.
///
/// Mirrored orientations carry no rotation of their own.
pub fn rotation_angle(correction: ImageOrientation) -> i32 {
    match correction {
        ImageOrientation::Up => 0,
        ImageOrientation::Down => 180,
        ImageOrientation::Left => 90,
        ImageOrientation::Right => -90,
        _ => 0,
    }
}

/// Shorthand for `rotation_angle(correction_orientation(orientation))`.
pub fn capture_rotation(orientation: CaptureOrientation) -> i32 {
    rotation_angle(correction_orientation(orientation))
}
