//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// An absolute `config_name` is returned as-is when it exists.
///
/// # Example
/// ```text
/// /home/user/site/content/      ← start
/// /home/user/site/sbx.toml      ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_start_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sbx.toml"), "").unwrap();

        let found = find_config_file(Path::new("sbx.toml"), dir.path());
        assert_eq!(found, Some(dir.path().join("sbx.toml")));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sbx.toml"), "").unwrap();
        let nested = dir.path().join("content/drafts");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(Path::new("sbx.toml"), &nested);
        assert_eq!(found, Some(dir.path().join("sbx.toml")));
    }

    #[test]
    fn test_absolute_config_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_file(&path, dir.path()), None);

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(&path, Path::new("/")), Some(path));
    }
}
