use serde::{Deserialize, Serialize};

/// Orientation of the host user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterfaceOrientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

/// Physical orientation of the handset as reported by its motion sensors.
///
/// Landscape values name the side the home edge points away from, so they
/// are mirrored relative to [`InterfaceOrientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceOrientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

/// Orientation applied to a capture connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureOrientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl CaptureOrientation {
    pub const ALL: [CaptureOrientation; 4] = [
        Self::Portrait,
        Self::PortraitUpsideDown,
        Self::LandscapeLeft,
        Self::LandscapeRight,
    ];
}

/// Orientation metadata attached to a pixel buffer.
///
/// Values follow EXIF semantics: they describe the transform needed to
/// display the stored pixels upright. `Right` (EXIF 6) needs a quarter turn
/// clockwise, `Left` (EXIF 8) a quarter turn counterclockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageOrientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

impl ImageOrientation {
    pub const ALL: [ImageOrientation; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpMirrored,
        Self::DownMirrored,
        Self::LeftMirrored,
        Self::RightMirrored,
    ];

    /// Whether displaying the buffer upright swaps its width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::LeftMirrored | Self::RightMirrored
        )
    }
}

/// The two orientations a session tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrientationState {
    /// Pinned connection orientation, overriding the dynamic one.
    pub fixed: Option<CaptureOrientation>,
    /// Orientation derived from the current UI/device state.
    pub dynamic: CaptureOrientation,
}

impl OrientationState {
    /// Orientation applied to the live connection.
    pub fn session_orientation(&self) -> CaptureOrientation {
        self.fixed.unwrap_or(self.dynamic)
    }

    /// Orientation snapshotted into a photo request when it is issued.
    pub fn capture_orientation(&self) -> CaptureOrientation {
        self.dynamic
    }
}
