use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Physical placement of a capture device on the handset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePosition {
    Unspecified,
    #[default]
    Back,
    Front,
}

impl fmt::Display for DevicePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "unspecified",
            Self::Back => "back",
            Self::Front => "front",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusMode {
    Locked,
    AutoFocus,
    ContinuousAutoFocus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExposureMode {
    Locked,
    AutoExpose,
    ContinuousAutoExposure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WhiteBalanceMode {
    Locked,
    AutoWhiteBalance,
    ContinuousAutoWhiteBalance,
}

/// Outputs a session can carry alongside its single device input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputKind {
    Photo,
    FrameStream,
}

/// Normalized point of interest, `(0, 0)` top-left to `(1, 1)` bottom-right
/// in sensor space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPoint {
    pub x: f64,
    pub y: f64,
}

impl FocusPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Converts a touch location in a portrait view into sensor space.
    ///
    /// The sensor's long edge runs along the view's vertical axis, so the
    /// view's y becomes the sensor's x. Returns `None` for an empty view.
    pub fn from_view_location(location: ViewPoint, view: ViewSize) -> Option<Self> {
        if view.width <= 0.0 || view.height <= 0.0 {
            return None;
        }
        Some(Self::new(
            location.y / view.height,
            1.0 - location.x / view.width,
        ))
    }
}

/// A location in host view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

/// Focus/exposure adjustment applied to the active device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusChange {
    pub point_of_interest: FocusPoint,
    /// Tap location that produced the point, when it came from a tap.
    pub view_location: Option<ViewPoint>,
}

/// A single preview frame delivered by the frame-stream output.
#[derive(Clone)]
pub struct VideoFrame {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoFrame")
            .field("sequence", &self.sequence)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

/// Events raised by the frame-stream output on the platform's frame context.
#[derive(Debug, Clone, Copy)]
pub enum FrameStreamEvent<'a> {
    Output(&'a VideoFrame),
    Dropped { sequence: u64 },
}

/// Counters for debugging a capture session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDiagnostics {
    pub frames_delivered: u64,
    pub frames_dropped: u64,
    pub captures_issued: u64,
    pub captures_delivered: u64,
    pub captures_failed: u64,
    pub captures_dropped: u64,
    pub reconfigurations: u64,
    pub deferred_reconfigurations: u64,
}
