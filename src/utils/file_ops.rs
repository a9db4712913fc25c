use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use crate::{ConvertError, Result};

/// Create exactly `path`, not its ancestors. An existing directory is reused.
/// Returns whether the directory was newly created.
pub fn ensure_directory(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Absolute, symlink-free form of the directory to walk, so every album
/// directory under it (the root included) has a name.
pub fn resolve_root(root: impl AsRef<Path>) -> Result<PathBuf> {
    let resolved = fs::canonicalize(root.as_ref())?;
    if !resolved.is_dir() {
        return Err(ConvertError::NotADirectory(resolved));
    }
    Ok(resolved)
}
