//! `[paths]` section configuration.
//!
//! All paths are relative to the directory holding the config file and are
//! made absolute while loading.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! content = "content"       # Markdown posts
//! static = "static"         # served under /static/
//! templates = "templates"   # page templates
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ConfigDiagnostics;

/// Directory layout of the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for `*.md` posts.
    pub content: PathBuf,

    /// Directory served under `/static/`.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,

    /// Directory holding the page templates.
    pub templates: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            static_dir: "static".into(),
            templates: "templates".into(),
        }
    }
}

impl PathsConfig {
    /// Resolve every path against `root`.
    pub fn normalize(&mut self, root: &Path) {
        for path in [&mut self.content, &mut self.static_dir, &mut self.templates] {
            *path = crate::utils::path::normalize_path(&root.join(&*path));
        }
    }

    /// The template directory must exist; content and static may be created later.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.templates.is_dir() {
            diag.error_with_hint(
                "paths.templates",
                format!("template directory `{}` not found", self.templates.display()),
                "point `paths.templates` at a directory containing base.html",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_paths_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.paths.content, PathBuf::from("content"));
        assert_eq!(config.paths.static_dir, PathBuf::from("static"));
        assert_eq!(config.paths.templates, PathBuf::from("templates"));
    }

    #[test]
    fn test_static_key_is_renamed() {
        let config = test_parse_config("[paths]\nstatic = \"public\"");
        assert_eq!(config.paths.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_normalize_joins_root() {
        let mut paths = PathsConfig::default();
        paths.normalize(Path::new("/srv/site"));
        assert_eq!(paths.content, PathBuf::from("/srv/site/content"));
        assert_eq!(paths.templates, PathBuf::from("/srv/site/templates"));
    }

    #[test]
    fn test_missing_templates_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut paths = PathsConfig::default();
        paths.normalize(dir.path());

        let mut diag = ConfigDiagnostics::new();
        paths.validate(&mut diag);
        assert!(diag.has_errors());

        std::fs::create_dir(dir.path().join("templates")).unwrap();
        let mut diag = ConfigDiagnostics::new();
        paths.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
