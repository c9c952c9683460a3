//! # camera-session-sim
//!
//! Simulated capture platform for camera-session-core.
//!
//! Provides:
//! - `SimulatedBackend`: Hardware session with presets, inputs, outputs, and photo delivery
//! - `DeviceRegistry` / `SimulatedDevice`: Discoverable sensors that record their settings
//! - `SimulatedAuthorization`: Camera permission gate with a scripted prompt
//! - `SimulatedOrientation`: Settable interface and device orientation
//! - `RecordingDelegate` / `RecordingPreview`: Observers for scenario checks
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use camera_session_core::{HostServices, MainQueue, SessionConfiguration, SessionController};
//! use camera_session_sim::{DeviceRegistry, SimulatedAuthorization, SimulatedBackend, SimulatedOrientation};
//!
//! let main = Arc::new(MainQueue::new());
//! let backend = SimulatedBackend::new(Arc::new(DeviceRegistry::standard()));
//! let services = HostServices {
//!     authorization: Arc::new(SimulatedAuthorization::authorized()),
//!     orientation: Arc::new(SimulatedOrientation::portrait()),
//!     main_context: main.clone(),
//! };
//! let controller = SessionController::new(backend, services, SessionConfiguration::default())?;
//! controller.activate();
//! ```

pub mod backend;
pub mod device_registry;
pub mod orientation;
pub mod permissions;
pub mod recording;
pub mod sensor;

pub use backend::{CaptureFault, CaptureMode, SimulatedBackend};
pub use device_registry::{DeviceCapabilities, DeviceRegistry, DeviceSettings, SimulatedDevice};
pub use orientation::SimulatedOrientation;
pub use permissions::SimulatedAuthorization;
pub use recording::{PreviewSnapshot, RecordingDelegate, RecordingPreview, SessionEvent};
