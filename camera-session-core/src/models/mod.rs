pub mod camera_models;
pub mod capture_result;
pub mod config;
pub mod error;
pub mod orientation;
pub mod photo_delivery;
pub mod state;
