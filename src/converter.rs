//! Drives one conversion run: album directories in, one ffmpeg call per file out.

use std::ffi::OsString;
use std::path::Path;

use crate::audio::ffmpeg::{Ffmpeg, Transcoder};
use crate::audio::format::Quality;
use crate::audio::target::{album_output_dir, output_file_path};
use crate::audio::walker::{AlbumWalker, FileGroup};
use crate::config::RunConfig;
use crate::utils::file_ops::{ensure_directory, resolve_root};
use crate::Result;

/// Locate ffmpeg and convert everything under `config.root`.
///
/// A missing tool fails before the filesystem is touched. Filesystem errors
/// stop the run; individual conversion failures only get logged.
pub fn run(config: &RunConfig) -> Result<()> {
    if config.dry_run {
        return plan(config);
    }

    let ffmpeg = Ffmpeg::locate(config.ffmpeg_path.as_deref())?;
    Converter::new(config, &ffmpeg).convert_all()
}

/// Print where every file would go, without creating or invoking anything.
fn plan(config: &RunConfig) -> Result<()> {
    let root = resolve_root(&config.root)?;
    println!("\nDry run - nothing will be converted");
    for group in AlbumWalker::new(&root, config.include_converted) {
        let group = group?;
        let target_dir = album_output_dir(&group.dir, config.format)?;
        println!("\nWould convert \"{}\" into \"{}\"", group.dir.display(), target_dir.display());
        for file in &group.files {
            let output = output_file_path(file, &target_dir, config.format)?;
            println!("    {} -> {}", file.display(), output.display());
        }
    }
    Ok(())
}

pub struct Converter<'a, T: Transcoder> {
    config: &'a RunConfig,
    transcoder: &'a T,
}

impl<'a, T: Transcoder> Converter<'a, T> {
    pub fn new(config: &'a RunConfig, transcoder: &'a T) -> Self {
        Self { config, transcoder }
    }

    pub fn convert_all(&self) -> Result<()> {
        let root = resolve_root(&self.config.root)?;
        log::info!("Walking {}", root.display());
        for group in AlbumWalker::new(&root, self.config.include_converted) {
            self.convert_group(&group?)?;
        }
        Ok(())
    }

    pub fn convert_group(&self, group: &FileGroup) -> Result<()> {
        let target_dir = album_output_dir(&group.dir, self.config.format)?;

        println!(
            "\nProcessing \"{}\" into \"{}\"",
            display_name(&group.dir),
            display_name(&target_dir)
        );
        if ensure_directory(&target_dir)? {
            log::debug!("Created {}", target_dir.display());
        } else {
            log::debug!("Reusing existing {}", target_dir.display());
        }

        for file in &group.files {
            let output = output_file_path(file, &target_dir, self.config.format)?;
            self.convert_file(file, &output);
        }
        Ok(())
    }

    /// One synchronous ffmpeg call. The outcome is logged and otherwise ignored.
    fn convert_file(&self, input: &Path, output: &Path) {
        println!("    Converting: {}", display_stem(input));
        let args = self.build_args(input, output);

        match self.transcoder.invoke(&args) {
            Ok(invocation) if invocation.success => {
                log::debug!("ffmpeg output for {}:\n{}", input.display(), invocation.stdout);
            }
            Ok(invocation) => {
                log::warn!(
                    "Conversion of {} failed: {}",
                    input.display(),
                    invocation.last_error_line()
                );
            }
            Err(e) => {
                log::warn!("Failed to run ffmpeg for {}: {}", input.display(), e);
            }
        }
    }

    /// `-i <input> [quality] [codec] -n|-y <output>`
    pub fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let format = self.config.format;
        let mut args: Vec<OsString> = vec!["-i".into(), input.as_os_str().to_os_string()];
        args.extend(
            Quality::args_for(self.config.quality.as_ref(), format)
                .into_iter()
                .map(OsString::from),
        );
        args.extend(format.codec_args().iter().map(OsString::from));
        let overwrite_flag = if self.config.overwrite { "-y" } else { "-n" };
        args.push(overwrite_flag.into());
        args.push(output.as_os_str().to_os_string());
        args
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn display_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
