pub mod decode_worker;
pub mod image_correction;
pub mod main_queue;
pub mod orientation_mapper;
