//! Settable interface and device orientation.

use parking_lot::Mutex;

use camera_session_core::models::orientation::{DeviceOrientation, InterfaceOrientation};
use camera_session_core::traits::orientation_provider::OrientationProvider;

#[derive(Default)]
pub struct SimulatedOrientation {
    interface: Mutex<InterfaceOrientation>,
    device: Mutex<DeviceOrientation>,
}

impl SimulatedOrientation {
    pub fn new(interface: InterfaceOrientation, device: DeviceOrientation) -> Self {
        Self {
            interface: Mutex::new(interface),
            device: Mutex::new(device),
        }
    }

    /// Upright phone with a portrait UI.
    pub fn portrait() -> Self {
        Self::new(InterfaceOrientation::Portrait, DeviceOrientation::Portrait)
    }

    pub fn set_interface(&self, orientation: InterfaceOrientation) {
        *self.interface.lock() = orientation;
    }

    pub fn set_device(&self, orientation: DeviceOrientation) {
        *self.device.lock() = orientation;
    }
}

impl OrientationProvider for SimulatedOrientation {
    fn interface_orientation(&self) -> InterfaceOrientation {
        *self.interface.lock()
    }

    fn device_orientation(&self) -> DeviceOrientation {
        *self.device.lock()
    }
}
