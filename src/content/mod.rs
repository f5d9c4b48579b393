//! Blog content on disk.
//!
//! Posts are plain `*.md` files under the content directory. There is no
//! index file: the post list is rebuilt from filenames on every request.
//!
//! ```text
//! content/
//! ├── hello-world.md     → slug "hello-world", title "hello world"
//! └── 2024/
//!     └── rust-notes.md  → slug "rust-notes", title "rust notes"
//! ```

pub mod markdown;

use jwalk::WalkDir;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of post source files.
const POST_EXTENSION: &str = "md";

/// Errors from reading blog content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content directory `{0}` does not exist")]
    MissingDir(PathBuf),

    #[error("invalid post slug `{0}`")]
    InvalidSlug(String),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// A post as shown in the post list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub title: String,
    pub slug: String,
}

impl PostSummary {
    /// Derive the summary from a post filename, `None` for non-posts.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let slug = name.strip_suffix(POST_EXTENSION)?.strip_suffix('.')?;
        if slug.is_empty() {
            return None;
        }
        Some(Self {
            title: title_from_slug(slug),
            slug: slug.to_string(),
        })
    }
}

/// Human-readable title: separators become spaces.
pub fn title_from_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

/// List every post under `dir`, sorted by slug.
///
/// Subdirectories are included; unreadable entries are skipped.
pub fn list_posts(dir: &Path) -> Result<Vec<PostSummary>, ContentError> {
    if !dir.is_dir() {
        return Err(ContentError::MissingDir(dir.to_path_buf()));
    }

    let mut posts: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| PostSummary::from_file_name(e.file_name().to_str()?))
        .collect();

    posts.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(posts)
}

/// Locate the source file for `slug`.
///
/// `content/<slug>.md` wins; otherwise the first match in a subdirectory, so
/// every listed post can be opened. `Ok(None)` when no such post exists.
pub fn find_post(dir: &Path, slug: &str) -> Result<Option<PathBuf>, ContentError> {
    validate_slug(slug)?;

    let file_name = format!("{slug}.{POST_EXTENSION}");
    let direct = dir.join(&file_name);
    if direct.is_file() {
        return Ok(Some(direct));
    }

    if !dir.is_dir() {
        return Ok(None);
    }

    let mut nested: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name().to_str() == Some(file_name.as_str()))
        .map(|e| e.path())
        .collect();
    nested.sort();

    Ok(nested.into_iter().next())
}

/// Slugs come straight from the URL; keep them to a single path segment.
fn validate_slug(slug: &str) -> Result<(), ContentError> {
    let invalid = slug.is_empty()
        || slug.starts_with('.')
        || slug.contains(['/', '\\', '\0'])
        || slug.contains("..");

    if invalid {
        return Err(ContentError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}
