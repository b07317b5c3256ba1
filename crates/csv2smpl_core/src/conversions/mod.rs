pub mod archive_builder;
pub mod frame_converter;
