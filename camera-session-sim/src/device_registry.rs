//! Simulated image sensors and their discovery registry.
//!
//! Devices record every setting applied to them so scenarios can check
//! what the session did. Lock failures can be injected per device.

use std::sync::Arc;

use parking_lot::Mutex;

use camera_session_core::models::camera_models::{
    DevicePosition, ExposureMode, FocusMode, FocusPoint, WhiteBalanceMode,
};
use camera_session_core::models::error::DeviceError;
use camera_session_core::traits::capture_device::CaptureDevice;

/// What a simulated sensor advertises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub focus_modes: Vec<FocusMode>,
    pub exposure_modes: Vec<ExposureMode>,
    pub white_balance_modes: Vec<WhiteBalanceMode>,
    pub smooth_autofocus: bool,
    pub low_light_boost: bool,
    pub focus_point_of_interest: bool,
    pub exposure_point_of_interest: bool,
}

impl DeviceCapabilities {
    /// A rear wide-angle camera with every mode available.
    pub fn full() -> Self {
        Self {
            focus_modes: vec![
                FocusMode::Locked,
                FocusMode::AutoFocus,
                FocusMode::ContinuousAutoFocus,
            ],
            exposure_modes: vec![
                ExposureMode::Locked,
                ExposureMode::AutoExpose,
                ExposureMode::ContinuousAutoExposure,
            ],
            white_balance_modes: vec![
                WhiteBalanceMode::Locked,
                WhiteBalanceMode::AutoWhiteBalance,
                WhiteBalanceMode::ContinuousAutoWhiteBalance,
            ],
            smooth_autofocus: true,
            low_light_boost: true,
            focus_point_of_interest: true,
            exposure_point_of_interest: true,
        }
    }

    /// A fixed-focus front camera: continuous exposure and white balance
    /// only, no points of interest.
    pub fn fixed_focus() -> Self {
        Self {
            focus_modes: vec![FocusMode::Locked],
            exposure_modes: vec![ExposureMode::ContinuousAutoExposure],
            white_balance_modes: vec![WhiteBalanceMode::ContinuousAutoWhiteBalance],
            smooth_autofocus: false,
            low_light_boost: false,
            focus_point_of_interest: false,
            exposure_point_of_interest: false,
        }
    }
}

/// Settings currently applied to a simulated sensor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceSettings {
    pub focus_mode: Option<FocusMode>,
    pub exposure_mode: Option<ExposureMode>,
    pub white_balance_mode: Option<WhiteBalanceMode>,
    pub smooth_autofocus: bool,
    pub low_light_boost: bool,
    pub focus_point: Option<FocusPoint>,
    pub exposure_point: Option<FocusPoint>,
}

#[derive(Default)]
struct DeviceState {
    settings: DeviceSettings,
    locked: bool,
    lock_count: usize,
    overlapping_locks: usize,
    mutations: usize,
    fail_lock: bool,
}

/// A simulated camera device.
pub struct SimulatedDevice {
    unique_id: String,
    localized_name: String,
    position: DevicePosition,
    capabilities: DeviceCapabilities,
    state: Mutex<DeviceState>,
}

impl SimulatedDevice {
    pub fn new(
        unique_id: impl Into<String>,
        localized_name: impl Into<String>,
        position: DevicePosition,
        capabilities: DeviceCapabilities,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            localized_name: localized_name.into(),
            position,
            capabilities,
            state: Mutex::new(DeviceState::default()),
        }
    }

    pub fn settings(&self) -> DeviceSettings {
        self.state.lock().settings.clone()
    }

    /// Number of successful setter calls.
    pub fn mutation_count(&self) -> usize {
        self.state.lock().mutations
    }

    /// Number of successful configuration locks.
    pub fn lock_count(&self) -> usize {
        self.state.lock().lock_count
    }

    /// Lock attempts made while another holder had the device locked.
    pub fn overlapping_lock_count(&self) -> usize {
        self.state.lock().overlapping_locks
    }

    pub fn is_locked(&self) -> bool {
        self.state.lock().locked
    }

    /// Make every subsequent `lock_for_configuration` fail.
    pub fn fail_lock(&self, fail: bool) {
        self.state.lock().fail_lock = fail;
    }

    fn mutate(&self, setting: &str, apply: impl FnOnce(&mut DeviceSettings)) -> Result<(), DeviceError> {
        let mut state = self.state.lock();
        if !state.locked {
            return Err(DeviceError::Rejected(format!(
                "{} set on {} without a configuration lock",
                setting, self.unique_id
            )));
        }
        apply(&mut state.settings);
        state.mutations += 1;
        Ok(())
    }

    fn unsupported(&self, what: impl std::fmt::Debug) -> DeviceError {
        DeviceError::Unsupported(format!("{:?} on {}", what, self.unique_id))
    }
}

impl CaptureDevice for SimulatedDevice {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn localized_name(&self) -> &str {
        &self.localized_name
    }

    fn position(&self) -> DevicePosition {
        self.position
    }

    fn is_focus_mode_supported(&self, mode: FocusMode) -> bool {
        self.capabilities.focus_modes.contains(&mode)
    }

    fn is_exposure_mode_supported(&self, mode: ExposureMode) -> bool {
        self.capabilities.exposure_modes.contains(&mode)
    }

    fn is_white_balance_mode_supported(&self, mode: WhiteBalanceMode) -> bool {
        self.capabilities.white_balance_modes.contains(&mode)
    }

    fn is_smooth_autofocus_supported(&self) -> bool {
        self.capabilities.smooth_autofocus
    }

    fn is_low_light_boost_supported(&self) -> bool {
        self.capabilities.low_light_boost
    }

    fn is_focus_point_of_interest_supported(&self) -> bool {
        self.capabilities.focus_point_of_interest
    }

    fn is_exposure_point_of_interest_supported(&self) -> bool {
        self.capabilities.exposure_point_of_interest
    }

    fn lock_for_configuration(&self) -> Result<(), DeviceError> {
        let mut state = self.state.lock();
        if state.fail_lock {
            return Err(DeviceError::LockFailed(format!("{} is busy", self.unique_id)));
        }
        if state.locked {
            state.overlapping_locks += 1;
            return Err(DeviceError::LockFailed(format!("{} already locked", self.unique_id)));
        }
        state.locked = true;
        state.lock_count += 1;
        Ok(())
    }

    fn unlock_for_configuration(&self) {
        self.state.lock().locked = false;
    }

    fn set_focus_mode(&self, mode: FocusMode) -> Result<(), DeviceError> {
        if !self.is_focus_mode_supported(mode) {
            return Err(self.unsupported(mode));
        }
        self.mutate("focus mode", |s| s.focus_mode = Some(mode))
    }

    fn set_exposure_mode(&self, mode: ExposureMode) -> Result<(), DeviceError> {
        if !self.is_exposure_mode_supported(mode) {
            return Err(self.unsupported(mode));
        }
        self.mutate("exposure mode", |s| s.exposure_mode = Some(mode))
    }

    fn set_white_balance_mode(&self, mode: WhiteBalanceMode) -> Result<(), DeviceError> {
        if !self.is_white_balance_mode_supported(mode) {
            return Err(self.unsupported(mode));
        }
        self.mutate("white balance mode", |s| s.white_balance_mode = Some(mode))
    }

    fn set_smooth_autofocus_enabled(&self, enabled: bool) -> Result<(), DeviceError> {
        if !self.capabilities.smooth_autofocus {
            return Err(self.unsupported("smooth autofocus"));
        }
        self.mutate("smooth autofocus", |s| s.smooth_autofocus = enabled)
    }

    fn set_automatically_enables_low_light_boost(&self, enabled: bool) -> Result<(), DeviceError> {
        if !self.capabilities.low_light_boost {
            return Err(self.unsupported("low-light boost"));
        }
        self.mutate("low-light boost", |s| s.low_light_boost = enabled)
    }

    fn set_focus_point_of_interest(&self, point: FocusPoint) -> Result<(), DeviceError> {
        if !self.capabilities.focus_point_of_interest {
            return Err(self.unsupported("focus point of interest"));
        }
        self.mutate("focus point", |s| s.focus_point = Some(point))
    }

    fn set_exposure_point_of_interest(&self, point: FocusPoint) -> Result<(), DeviceError> {
        if !self.capabilities.exposure_point_of_interest {
            return Err(self.unsupported("exposure point of interest"));
        }
        self.mutate("exposure point", |s| s.exposure_point = Some(point))
    }
}

/// The set of sensors the simulated platform can discover.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: Mutex<Vec<Arc<SimulatedDevice>>>,
}

impl DeviceRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A phone-like layout: a fully featured back camera and a
    /// fixed-focus front camera.
    pub fn standard() -> Self {
        let registry = Self::empty();
        registry.add(SimulatedDevice::new(
            "sim-back-wide",
            "Back Camera",
            DevicePosition::Back,
            DeviceCapabilities::full(),
        ));
        registry.add(SimulatedDevice::new(
            "sim-front",
            "Front Camera",
            DevicePosition::Front,
            DeviceCapabilities::fixed_focus(),
        ));
        registry
    }

    pub fn add(&self, device: SimulatedDevice) -> Arc<SimulatedDevice> {
        let device = Arc::new(device);
        self.devices.lock().push(Arc::clone(&device));
        device
    }

    /// Unplug a device. Sessions already holding it keep their handle.
    pub fn remove(&self, unique_id: &str) -> Option<Arc<SimulatedDevice>> {
        let mut devices = self.devices.lock();
        let index = devices.iter().position(|d| d.unique_id() == unique_id)?;
        Some(devices.remove(index))
    }

    pub fn get(&self, unique_id: &str) -> Option<Arc<SimulatedDevice>> {
        self.devices
            .lock()
            .iter()
            .find(|d| d.unique_id() == unique_id)
            .cloned()
    }

    /// Devices at `position`, in registration order.
    pub fn discover(&self, position: DevicePosition) -> Vec<Arc<dyn CaptureDevice>> {
        self.devices
            .lock()
            .iter()
            .filter(|d| d.position() == position)
            .map(|d| Arc::clone(d) as Arc<dyn CaptureDevice>)
            .collect()
    }
}
