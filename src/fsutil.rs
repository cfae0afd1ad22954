//! Small filesystem helpers that attach the offending path to every error.

use crate::error::FsError;
use std::path::{Path, PathBuf};

pub fn create_dir_all(path: &Path) -> Result<(), FsError> {
    std::fs::create_dir_all(path).map_err(|e| FsError::create_dir(path, e))
}

pub fn read_to_string(path: &Path) -> Result<String, FsError> {
    std::fs::read_to_string(path).map_err(|e| FsError::read(path, e))
}

pub fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), FsError> {
    std::fs::write(path, contents).map_err(|e| FsError::write(path, e))
}

pub fn remove_file(path: &Path) -> Result<(), FsError> {
    std::fs::remove_file(path).map_err(|e| FsError::remove(path, e))
}

/// Remove a directory tree or a single file.
pub fn remove_path(path: &Path) -> Result<(), FsError> {
    if path.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| FsError::remove(path, e))
    } else {
        remove_file(path)
    }
}

/// Move `from` to `to`. A no-op when both name the same file.
pub fn relocate(from: &Path, to: &Path) -> Result<(), FsError> {
    if from == to {
        return Ok(());
    }
    std::fs::rename(from, to).map_err(|e| FsError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })
}

/// Mark a generated script executable (0o755).
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<(), FsError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|e| {
        FsError::Permissions {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<(), FsError> {
    Ok(())
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Canonical absolute path without Windows verbatim prefixes.
pub fn absolute(path: &Path) -> Result<PathBuf, FsError> {
    dunce::canonicalize(path).map_err(|e| FsError::read(path, e))
}
