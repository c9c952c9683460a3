use crate::models::camera_models::{
    DevicePosition, ExposureMode, FocusMode, FocusPoint, WhiteBalanceMode,
};
use crate::models::error::DeviceError;

/// A physical image sensor exposed by the platform.
///
/// Setters may only be called between `lock_for_configuration` and
/// `unlock_for_configuration`; the session wraps that pair in
/// [`DeviceConfigurationLock`](crate::session::device_resolver::DeviceConfigurationLock).
pub trait CaptureDevice: Send + Sync {
    fn unique_id(&self) -> &str;

    fn localized_name(&self) -> &str;

    fn position(&self) -> DevicePosition;

    fn is_focus_mode_supported(&self, mode: FocusMode) -> bool;

    fn is_exposure_mode_supported(&self, mode: ExposureMode) -> bool;

    fn is_white_balance_mode_supported(&self, mode: WhiteBalanceMode) -> bool;

    fn is_smooth_autofocus_supported(&self) -> bool;

    fn is_low_light_boost_supported(&self) -> bool;

    fn is_focus_point_of_interest_supported(&self) -> bool;

    fn is_exposure_point_of_interest_supported(&self) -> bool;

    /// Acquire exclusive configuration access to the hardware.
    fn lock_for_configuration(&self) -> Result<(), DeviceError>;

    fn unlock_for_configuration(&self);

    fn set_focus_mode(&self, mode: FocusMode) -> Result<(), DeviceError>;

    fn set_exposure_mode(&self, mode: ExposureMode) -> Result<(), DeviceError>;

    fn set_white_balance_mode(&self, mode: WhiteBalanceMode) -> Result<(), DeviceError>;

    fn set_smooth_autofocus_enabled(&self, enabled: bool) -> Result<(), DeviceError>;

    fn set_automatically_enables_low_light_boost(&self, enabled: bool) -> Result<(), DeviceError>;

    fn set_focus_point_of_interest(&self, point: FocusPoint) -> Result<(), DeviceError>;

    fn set_exposure_point_of_interest(&self, point: FocusPoint) -> Result<(), DeviceError>;
}
