//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Make `path` absolute, resolving symlinks when it exists.
///
/// Falls back to joining with cwd for paths that do not exist yet.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}
