use thiserror::Error;

use super::camera_models::DevicePosition;

/// Errors raised by a capture device while it is being configured.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("failed to lock device for configuration: {0}")]
    LockFailed(String),

    #[error("operation not supported by device: {0}")]
    Unsupported(String),

    #[error("device rejected setting: {0}")]
    Rejected(String),
}

/// Errors that can occur while configuring a session or capturing a photo.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("camera access denied")]
    PermissionDenied,

    #[error("camera access restricted")]
    PermissionRestricted,

    #[error("no capture device found at position {0}")]
    DeviceNotFound(DevicePosition),

    #[error("device configuration failed: {0}")]
    DeviceConfigurationFailed(#[from] DeviceError),

    #[error("capture unavailable: session not running or no photo output attached")]
    CaptureUnavailable,

    #[error("capture request ended without a usable result")]
    CaptureAbandoned,

    #[error("failed to decode captured photo: {0}")]
    DecodeFailed(String),

    #[error("session rejected device input: {0}")]
    InputRejected(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to load configuration: {0}")]
    ConfigurationLoad(String),
}
