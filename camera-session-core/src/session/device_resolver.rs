use std::ops::Deref;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::models::camera_models::{
    DevicePosition, ExposureMode, FocusMode, FocusPoint, WhiteBalanceMode,
};
use crate::models::error::{DeviceError, SessionError};
use crate::traits::capture_backend::CaptureBackend;
use crate::traits::capture_device::CaptureDevice;

/// Device-level options applied on every (re)configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceOptions {
    pub low_light_boost: bool,
}

/// Exclusive configuration access to one device.
///
/// Holds the resolver's gate for its whole lifetime, so all device-setting
/// mutations are serialized. The device is unlocked when the guard drops,
/// on every exit path.
pub struct DeviceConfigurationLock<'a> {
    device: &'a (dyn CaptureDevice + 'static),
    _gate: MutexGuard<'a, ()>,
}

impl Deref for DeviceConfigurationLock<'_> {
    type Target = dyn CaptureDevice;

    fn deref(&self) -> &Self::Target {
        self.device
    }
}

impl Drop for DeviceConfigurationLock<'_> {
    fn drop(&mut self) {
        self.device.unlock_for_configuration();
    }
}

/// Finds physical devices by position and applies device configuration.
#[derive(Default)]
pub struct DeviceResolver {
    gate: Mutex<()>,
}

impl DeviceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// First discovered device at `position`. Never cached: every call
    /// queries the backend again.
    pub fn resolve<B: CaptureBackend + ?Sized>(
        &self,
        backend: &B,
        position: DevicePosition,
    ) -> Result<Arc<dyn CaptureDevice>, SessionError> {
        backend
            .discover_devices(position)
            .into_iter()
            .find(|device| device.position() == position)
            .ok_or(SessionError::DeviceNotFound(position))
    }

    pub fn lock<'a>(
        &'a self,
        device: &'a (dyn CaptureDevice + 'static),
    ) -> Result<DeviceConfigurationLock<'a>, DeviceError> {
        let gate = self.gate.lock();
        device.lock_for_configuration()?;
        Ok(DeviceConfigurationLock {
            device,
            _gate: gate,
        })
    }

    /// Enable every continuous auto mode the device advertises.
    ///
    /// Stops at the first failing setter; settings applied before it stay.
    pub fn configure(
        &self,
        device: &(dyn CaptureDevice + 'static),
        options: DeviceOptions,
    ) -> Result<(), SessionError> {
        let device = self.lock(device)?;

        if device.is_focus_mode_supported(FocusMode::ContinuousAutoFocus) {
            device.set_focus_mode(FocusMode::ContinuousAutoFocus)?;
        }
        if device.is_smooth_autofocus_supported() {
            device.set_smooth_autofocus_enabled(true)?;
        }
        if device.is_exposure_mode_supported(ExposureMode::ContinuousAutoExposure) {
            device.set_exposure_mode(ExposureMode::ContinuousAutoExposure)?;
        }
        if device.is_white_balance_mode_supported(WhiteBalanceMode::ContinuousAutoWhiteBalance) {
            device.set_white_balance_mode(WhiteBalanceMode::ContinuousAutoWhiteBalance)?;
        }
        if device.is_low_light_boost_supported() {
            device.set_automatically_enables_low_light_boost(options.low_light_boost)?;
        }

        log::debug!("Configured device {} ({})", device.localized_name(), device.unique_id());
        Ok(())
    }

    /// Point focus and exposure at `point`.
    ///
    /// Returns `Ok(false)` without touching the device when it supports
    /// neither point of interest.
    pub fn apply_focus_point(
        &self,
        device: &(dyn CaptureDevice + 'static),
        point: FocusPoint,
    ) -> Result<bool, SessionError> {
        let focus = device.is_focus_point_of_interest_supported();
        let exposure = device.is_exposure_point_of_interest_supported();
        if !focus && !exposure {
            return Ok(false);
        }

        let device = self.lock(device)?;
        if focus {
            device.set_focus_point_of_interest(point)?;
            if device.is_focus_mode_supported(FocusMode::AutoFocus) {
                device.set_focus_mode(FocusMode::AutoFocus)?;
            }
        }
        if exposure {
            device.set_exposure_point_of_interest(point)?;
            if device.is_exposure_mode_supported(ExposureMode::ContinuousAutoExposure) {
                device.set_exposure_mode(ExposureMode::ContinuousAutoExposure)?;
            }
        }
        Ok(true)
    }
}
