pub mod file_size;
pub mod video_types;
