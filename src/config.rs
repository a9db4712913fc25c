use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::audio::format::{OutputFormat, Quality};
use crate::cli::commands::Cli;
use crate::{ConvertError, Result};

/// Settings from the optional TOML config file.
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// ffmpeg binary to use instead of searching PATH.
    pub ffmpeg_path: Option<PathBuf>,
    /// Default quality token when `-q` is not given.
    pub quality: Option<String>,
    /// Walk into previously generated `<album> (<format>)` directories.
    pub include_converted: bool,
    /// Overwrite existing output files.
    pub overwrite: bool,
}

impl AppConfig {
    /// Load config from an explicit file, or from the platform config dir.
    /// An explicit file must be readable and valid. The default file is
    /// optional and a broken one only logs a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                ConvertError::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let config = Self::parse(&contents)?;
            log::info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        match Self::config_path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&contents) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        Ok(config)
                    }
                    Err(e) => {
                        log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                        Ok(Self::default())
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                    Ok(Self::default())
                }
            },
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Everything one conversion run needs, passed by reference to the walker and
/// the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub root: PathBuf,
    pub format: OutputFormat,
    pub quality: Option<Quality>,
    pub ffmpeg_path: Option<PathBuf>,
    pub include_converted: bool,
    pub overwrite: bool,
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(root: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            root: root.into(),
            format,
            quality: None,
            ffmpeg_path: None,
            include_converted: false,
            overwrite: false,
            dry_run: false,
        }
    }

    /// Merge command-line flags over the config file.
    pub fn from_cli(cli: &Cli, file: AppConfig) -> Self {
        // A blank token means no quality flag at all
        let quality = non_blank(cli.quality.as_deref())
            .or_else(|| non_blank(file.quality.as_deref()))
            .map(Quality::from_token);

        Self {
            root: cli.directory.clone(),
            format: cli.format,
            quality,
            ffmpeg_path: cli.ffmpeg.clone().or(file.ffmpeg_path),
            include_converted: cli.include_converted || file.include_converted,
            overwrite: cli.overwrite || file.overwrite,
            dry_run: cli.dry_run,
        }
    }
}

fn non_blank(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}
