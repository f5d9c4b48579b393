//! Static asset lookup.

use std::path::{Path, PathBuf};

/// Map the (decoded) part of a URL after `/static/` to a file under `static_root`.
///
/// `None` for anything that is not a regular file inside the root, including
/// `..` segments and symlinks pointing outside it. Directories are not listed.
pub fn resolve_static(rel: &str, static_root: &Path) -> Option<PathBuf> {
    let clean = rel.trim_matches('/');

    if clean.is_empty() || clean.split(['/', '\\']).any(|seg| seg == "..") {
        return None;
    }

    let canonical = static_root.join(clean).canonicalize().ok()?;
    let root_canonical = static_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) || !canonical.is_file() {
        return None;
    }

    Some(canonical)
}
