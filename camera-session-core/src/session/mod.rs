pub mod capture_pipeline;
pub mod controller;
pub mod device_resolver;
