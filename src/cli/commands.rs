use clap::Parser;
use std::path::PathBuf;
use crate::audio::format::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "album-converter")]
#[command(version = "1.0")]
#[command(about = "Convert every album under a directory into a sibling '<album> (<format>)' directory using ffmpeg", long_about = None)]
pub struct Cli {
    /// Directory whose audio files to convert
    pub directory: PathBuf,

    /// Output format to convert to
    #[arg(short = 'f', long, value_enum, ignore_case = true)]
    pub format: OutputFormat,

    /// Output quality: a bitrate such as 320k, or a variable quality value. Ignored for flac and wav
    #[arg(short = 'q', long)]
    pub quality: Option<String>,

    /// Path to the ffmpeg binary (searched on PATH by default)
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Also walk into previously generated '<album> (<format>)' directories
    #[arg(long)]
    pub include_converted: bool,

    /// Overwrite output files that already exist
    #[arg(long)]
    pub overwrite: bool,

    /// Only show what would be converted
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
