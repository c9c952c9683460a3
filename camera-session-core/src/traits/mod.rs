pub mod authorization;
pub mod capture_backend;
pub mod capture_device;
pub mod main_context;
pub mod orientation_provider;
pub mod preview_surface;
pub mod session_delegate;
