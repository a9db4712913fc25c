pub mod ffmpeg;
pub mod format;
pub mod target;
pub mod walker;
