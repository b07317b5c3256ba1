pub mod frame_table;
pub mod motion_archive;
