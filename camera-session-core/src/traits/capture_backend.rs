use std::sync::Arc;

use crate::models::camera_models::{DevicePosition, FrameStreamEvent, OutputKind};
use crate::models::config::SessionPreset;
use crate::models::error::SessionError;
use crate::models::photo_delivery::{DeliveryTier, PhotoDelivery, PhotoSettings};
use crate::traits::capture_device::CaptureDevice;

/// Callback invoked with the raw result of a photo request.
///
/// Fires on a platform delivery thread. A backend may invoke it more than
/// once per request (one call per delivery shape); the session accepts the
/// first delivery that matches the backend's [`DeliveryTier`].
pub type PhotoCallback = Arc<dyn Fn(PhotoDelivery) + Send + Sync + 'static>;

/// Callback invoked for every frame-stream event, on the platform's
/// frame-stream context. Keep processing minimal.
pub type FrameCallback = Arc<dyn for<'a> Fn(FrameStreamEvent<'a>) + Send + Sync + 'static>;

/// Output configuration handed to the hardware session.
#[derive(Clone)]
pub enum OutputConfig {
    Photo {
        high_resolution_capture: bool,
        dual_photo_delivery: bool,
    },
    FrameStream {
        discards_late_frames: bool,
        callback: FrameCallback,
    },
}

impl OutputConfig {
    pub fn kind(&self) -> OutputKind {
        match self {
            Self::Photo { .. } => OutputKind::Photo,
            Self::FrameStream { .. } => OutputKind::FrameStream,
        }
    }
}

impl std::fmt::Debug for OutputConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Photo {
                high_resolution_capture,
                dual_photo_delivery,
            } => f
                .debug_struct("Photo")
                .field("high_resolution_capture", high_resolution_capture)
                .field("dual_photo_delivery", dual_photo_delivery)
                .finish(),
            Self::FrameStream {
                discards_late_frames,
                ..
            } => f
                .debug_struct("FrameStream")
                .field("discards_late_frames", discards_late_frames)
                .finish_non_exhaustive(),
        }
    }
}

/// The platform's live hardware pipeline and device discovery.
///
/// Implemented by platform backends (e.g. the simulator in
/// `camera-session-sim`). Only the session controller calls into it.
pub trait CaptureBackend: Send + Sync + 'static {
    /// Physical devices currently available at `position`.
    fn discover_devices(&self, position: DevicePosition) -> Vec<Arc<dyn CaptureDevice>>;

    /// Which photo delivery shape this platform supports.
    fn delivery_tier(&self) -> DeliveryTier;

    fn begin_configuration(&self);

    fn commit_configuration(&self);

    fn can_set_preset(&self, preset: SessionPreset) -> bool;

    fn set_preset(&self, preset: SessionPreset);

    fn can_add_input(&self, device: &dyn CaptureDevice) -> bool;

    fn add_input(&self, device: Arc<dyn CaptureDevice>) -> Result<(), SessionError>;

    /// Unique ids of the devices currently attached as inputs.
    fn input_device_ids(&self) -> Vec<String>;

    fn remove_input(&self, device_id: &str);

    fn can_add_output(&self, output: &OutputConfig) -> bool;

    fn add_output(&self, output: OutputConfig);

    fn supports_dual_photo_delivery(&self) -> bool;

    /// Pixel formats the photo output can produce preview thumbnails in.
    fn available_preview_pixel_formats(&self) -> Vec<u32>;

    fn start_running(&self);

    fn stop_running(&self);

    fn is_running(&self) -> bool;

    /// Issue a photo request. The result arrives later through `callback`.
    fn capture_photo(&self, settings: PhotoSettings, callback: PhotoCallback);
}
