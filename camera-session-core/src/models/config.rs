use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::camera_models::DevicePosition;
use super::error::SessionError;
use super::orientation::CaptureOrientation;

/// Resolution/quality tier requested from the hardware session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPreset {
    Photo,
    #[default]
    High,
    Medium,
    Low,
    Vga640x480,
    Hd1280x720,
    Hd1920x1080,
    Hd4k3840x2160,
}

impl SessionPreset {
    /// Preset used when the requested one is not supported by the hardware.
    pub const FALLBACK: SessionPreset = SessionPreset::High;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashMode {
    #[default]
    Off,
    On,
    Auto,
}

/// How the preview surface fills its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoGravity {
    ResizeAspect,
    #[default]
    ResizeAspectFill,
    Resize,
}

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfiguration {
    /// Resolution tier (default: high).
    pub preset: SessionPreset,

    /// Which physical camera to use (default: back).
    pub position: DevicePosition,

    /// Flash mode applied to each photo request (default: off).
    pub flash_mode: FlashMode,

    /// Let the device boost exposure in low light when it supports it.
    pub low_light_boost: bool,

    /// Pin the live connection to one orientation instead of following the UI.
    pub fixed_orientation: Option<CaptureOrientation>,

    /// Focus and expose on tapped points (default: false).
    pub tap_to_focus: bool,

    /// Preview fill mode (default: aspect fill).
    pub video_gravity: VideoGravity,

    /// Request full sensor resolution for photos (default: true).
    pub high_resolution_capture: bool,

    /// Preview thumbnail width requested with each photo, in pixels.
    pub preview_thumbnail_width: u32,

    /// Preview thumbnail height requested with each photo, in pixels.
    pub preview_thumbnail_height: u32,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.preview_thumbnail_width == 0 || self.preview_thumbnail_height == 0 {
            return Err("preview thumbnail dimensions must be positive".into());
        }
        if self.preview_thumbnail_width > 4096 || self.preview_thumbnail_height > 4096 {
            return Err(format!(
                "preview thumbnail too large: {}x{}",
                self.preview_thumbnail_width, self.preview_thumbnail_height
            ));
        }
        Ok(())
    }

    /// Parses a JSON configuration; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SessionError> {
        let config: SessionConfiguration = serde_json::from_str(json)
            .map_err(|e| SessionError::ConfigurationLoad(format!("failed to parse configuration: {}", e)))?;
        config.validate().map_err(SessionError::InvalidConfiguration)?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| SessionError::ConfigurationLoad(format!("failed to read configuration: {}", e)))?;
        Self::from_json_str(&json)
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            preset: SessionPreset::High,
            position: DevicePosition::Back,
            flash_mode: FlashMode::Off,
            low_light_boost: false,
            fixed_orientation: None,
            tap_to_focus: false,
            video_gravity: VideoGravity::ResizeAspectFill,
            high_resolution_capture: true,
            preview_thumbnail_width: 160,
            preview_thumbnail_height: 160,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        assert!(SessionConfiguration::default().validate().is_ok());
    }

    #[test]
    fn zero_thumbnail_invalid() {
        let config = SessionConfiguration {
            preview_thumbnail_height: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = SessionConfiguration::from_json_str(
            r#"{ "position": "front", "preset": "hd1920x1080", "fixed_orientation": "landscape_left" }"#,
        )
        .unwrap();

        assert_eq!(config.position, DevicePosition::Front);
        assert_eq!(config.preset, SessionPreset::Hd1920x1080);
        assert_eq!(config.fixed_orientation, Some(CaptureOrientation::LandscapeLeft));
        assert_eq!(config.flash_mode, FlashMode::Off);
        assert!(config.high_resolution_capture);
        assert_eq!(config.preview_thumbnail_width, 160);
    }

    #[test]
    fn json_with_invalid_values_is_rejected() {
        let err = SessionConfiguration::from_json_str(r#"{ "preview_thumbnail_width": 0 }"#).unwrap_err();
        assert!(matches!(err, SessionError::InvalidConfiguration(_)));

        let err = SessionConfiguration::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SessionError::ConfigurationLoad(_)));
    }
}
