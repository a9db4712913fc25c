use std::path::PathBuf;

pub mod audio;
pub mod cli;
pub mod config;
pub mod converter;
pub mod utils;

/// Audio file extensions picked up by the walker, compared case-insensitively.
pub const AUDIO_EXTENSIONS: &[&str] = &["flac", "wav", "ogg", "mp3", "m4a"];

/// Application name for config paths
pub const APP_NAME: &str = "album-converter";

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Transcoding tool not found: {0}")]
    ToolNotFound(String),
    #[error("Path has no usable file name: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

// Re-exports for convenience
pub use audio::ffmpeg::{Ffmpeg, Invocation, Transcoder};
pub use audio::format::{OutputFormat, Quality};
pub use audio::target::ConversionTarget;
pub use audio::walker::{AlbumWalker, FileGroup};
pub use config::{AppConfig, RunConfig};
pub use converter::{run, Converter};
