//! Locating and invoking the ffmpeg binary.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use crate::{ConvertError, Result};

const TOOL_NAME: &str = "ffmpeg";

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl Invocation {
    /// Last non-empty stderr line, which is where ffmpeg puts the actual error.
    pub fn last_error_line(&self) -> &str {
        self.stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("Unknown error")
    }
}

/// Something that can run one transcoding command line.
pub trait Transcoder {
    fn invoke(&self, args: &[OsString]) -> std::io::Result<Invocation>;
}

/// A located ffmpeg executable.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    path: PathBuf,
}

impl Ffmpeg {
    /// Find ffmpeg once, before any work starts. An explicit path wins over
    /// the `PATH` search.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if path.is_file() => {
                log::info!("Using configured ffmpeg at {}", path.display());
                Ok(Self { path: path.to_path_buf() })
            }
            Some(path) => Err(ConvertError::ToolNotFound(format!(
                "{} does not exist",
                path.display()
            ))),
            None => {
                let search_path = env::var_os("PATH").unwrap_or_default();
                Self::locate_in(&search_path)
            }
        }
    }

    /// Search a `PATH`-style list of directories for ffmpeg.
    pub fn locate_in(search_path: &OsStr) -> Result<Self> {
        for dir in env::split_paths(search_path) {
            for name in candidate_names() {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    log::info!("Found ffmpeg at {}", candidate.display());
                    return Ok(Self { path: candidate });
                }
            }
        }
        Err(ConvertError::ToolNotFound(format!(
            "{} is not on the system path",
            TOOL_NAME
        )))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn candidate_names() -> Vec<String> {
    if cfg!(windows) {
        vec![format!("{}.exe", TOOL_NAME), TOOL_NAME.to_string()]
    } else {
        vec![TOOL_NAME.to_string()]
    }
}

impl Transcoder for Ffmpeg {
    fn invoke(&self, args: &[OsString]) -> std::io::Result<Invocation> {
        log::debug!("Running {} {:?}", self.path.display(), args);

        // Null stdin so an overwrite prompt can never block the run
        let output = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(Invocation {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
