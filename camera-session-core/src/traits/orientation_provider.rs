use crate::models::orientation::{DeviceOrientation, InterfaceOrientation};

/// Source of ambient orientation state, injected so tests can simulate it.
pub trait OrientationProvider: Send + Sync {
    fn interface_orientation(&self) -> InterfaceOrientation;

    fn device_orientation(&self) -> DeviceOrientation;
}
