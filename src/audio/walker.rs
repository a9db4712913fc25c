use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};
use crate::audio::target::is_converted_dir_name;
use crate::{Result, AUDIO_EXTENSIONS};

/// Audio files found directly inside one directory. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Lazily yields one [`FileGroup`] per album directory under a root.
///
/// Directories are visited depth-first in file name order. Unless
/// `include_converted` is set, directories named like our own output
/// (`Album (ogg)`) are not descended into, so re-runs and directories created
/// during the walk itself are left alone.
pub struct AlbumWalker {
    dirs: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
}

impl AlbumWalker {
    pub fn new(root: impl AsRef<Path>, include_converted: bool) -> Self {
        let dirs = WalkDir::new(root.as_ref())
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| {
                if !e.file_type().is_dir() {
                    return false;
                }
                if include_converted || e.depth() == 0 {
                    return true;
                }
                let skip = e.file_name().to_str().map_or(false, is_converted_dir_name);
                if skip {
                    log::debug!("Skipping converted directory: {}", e.path().display());
                }
                !skip
            });

        Self { dirs: Box::new(dirs) }
    }

    fn collect_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_audio_file(entry.path()) {
                files.push(entry.into_path());
            } else if entry.file_type().is_file() {
                log::trace!("Skipping non-audio file: {}", entry.path().display());
            }
        }
        Ok(files)
    }
}

impl Iterator for AlbumWalker {
    type Item = Result<FileGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.dirs.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            match Self::collect_audio_files(entry.path()) {
                Ok(files) if files.is_empty() => continue,
                Ok(files) => {
                    return Some(Ok(FileGroup {
                        dir: entry.into_path(),
                        files,
                    }))
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
