use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use regex::Regex;
use crate::audio::format::OutputFormat;
use crate::{ConvertError, Result};

/// Where one input file ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTarget {
    pub output_dir: PathBuf,
    pub output_file: PathBuf,
}

impl ConversionTarget {
    pub fn derive(input: impl AsRef<Path>, format: OutputFormat) -> Result<Self> {
        let input = input.as_ref();
        let album_dir = input
            .parent()
            .ok_or_else(|| ConvertError::InvalidPath(input.to_path_buf()))?;
        let output_dir = album_output_dir(album_dir, format)?;
        let output_file = output_file_path(input, &output_dir, format)?;
        Ok(Self { output_dir, output_file })
    }
}

/// `<parent>/<album> (<format>)`, a sibling of `album_dir`.
pub fn album_output_dir(album_dir: impl AsRef<Path>, format: OutputFormat) -> Result<PathBuf> {
    let album_dir = album_dir.as_ref();
    let name = album_dir
        .file_name()
        .ok_or_else(|| ConvertError::InvalidPath(album_dir.to_path_buf()))?;

    let mut new_name = name.to_os_string();
    new_name.push(format!(" ({})", format));

    Ok(match album_dir.parent() {
        Some(parent) => parent.join(new_name),
        None => PathBuf::from(new_name),
    })
}

/// `<output_dir>/<input stem>.<format>`
pub fn output_file_path(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .ok_or_else(|| ConvertError::InvalidPath(input.to_path_buf()))?;

    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(format.as_str());
    Ok(output_dir.as_ref().join(file_name))
}

fn converted_dir_regex() -> &'static Regex {
    static CONVERTED: OnceLock<Regex> = OnceLock::new();
    CONVERTED.get_or_init(|| {
        Regex::new(r"^.+ \((ogg|mp3|flac|wav)\)$").expect("valid converted dir pattern")
    })
}

/// True for directory names this tool generates, e.g. `Kerplunk (ogg)`.
pub fn is_converted_dir_name(name: &str) -> bool {
    converted_dir_regex().is_match(name)
}
