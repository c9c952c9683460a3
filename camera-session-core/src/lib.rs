//! # camera-session-core
//!
//! Platform-agnostic camera capture session controller.
//!
//! Owns device selection, session configuration, tap-to-focus, and the
//! photo capture pipeline that turns raw sensor deliveries into upright
//! images. Platform backends implement `CaptureBackend` and `CaptureDevice`
//! and plug into the generic `SessionController`.
//!
//! ## Architecture
//!
//! ```text
//! camera-session-core (this crate)
//! ├── traits/       ← CaptureBackend, CaptureDevice, SessionDelegate, host services
//! ├── models/       ← SessionError, SessionState, SessionConfiguration, orientations, etc.
//! ├── processing/   ← orientation mapping, image correction, decode worker, main queue
//! └── session/      ← SessionController, DeviceResolver, CapturePipeline
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::camera_models::{
    DevicePosition, ExposureMode, FocusChange, FocusMode, FocusPoint, FrameStreamEvent, OutputKind,
    SessionDiagnostics, VideoFrame, ViewPoint, ViewSize, WhiteBalanceMode,
};
pub use models::capture_result::{CaptureRequest, CorrectedImage};
pub use models::config::{FlashMode, SessionConfiguration, SessionPreset, VideoGravity};
pub use models::error::{DeviceError, SessionError};
pub use models::orientation::{
    CaptureOrientation, DeviceOrientation, ImageOrientation, InterfaceOrientation,
    OrientationState,
};
pub use models::photo_delivery::{
    DeliveryTier, PhotoBuffer, PhotoDelivery, PhotoSettings, PreviewFormat,
};
pub use models::state::{AuthorizationStatus, SessionState};
pub use processing::main_queue::MainQueue;
pub use session::controller::{HostServices, SessionController};
pub use traits::authorization::{AccessCallback, AuthorizationProvider};
pub use traits::capture_backend::{CaptureBackend, FrameCallback, OutputConfig, PhotoCallback};
pub use traits::capture_device::CaptureDevice;
pub use traits::main_context::{MainContext, MainTask};
pub use traits::orientation_provider::OrientationProvider;
pub use traits::preview_surface::PreviewSurface;
pub use traits::session_delegate::SessionDelegate;
