//! `[terminal]` section configuration.
//!
//! Settings for the homepage terminal widget.
//!
//! # Example
//!
//! ```toml
//! [terminal]
//! mount = "/commands"                 # endpoint the widget posts to
//! sections = ["blog", "home"]         # what `ls` prints
//! github = "https://github.com/thesandybridge"
//! contact = [
//!     "email:      hello@example.com",
//!     "github:     /thesandybridge",
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Terminal widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Path prefix of the command endpoint. The page path follows it.
    pub mount: String,

    /// Site sections listed by `ls`.
    pub sections: Vec<String>,

    /// Profile URL opened by `github`.
    pub github: String,

    /// Lines printed by `contact`.
    pub contact: Vec<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            mount: "/commands".into(),
            sections: vec!["blog".into(), "home".into()],
            github: "https://github.com/thesandybridge".into(),
            contact: vec![
                "email:      hello@example.com".into(),
                "github:     /thesandybridge".into(),
            ],
        }
    }
}

impl TerminalConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.mount.starts_with('/') || self.mount.len() < 2 || self.mount.ends_with('/') {
            diag.error_with_hint(
                "terminal.mount",
                format!("invalid mount path `{}`", self.mount),
                "use an absolute path without a trailing slash, e.g. \"/commands\"",
            );
        }

        if self.sections.is_empty() {
            diag.error("terminal.sections", "must list at least one section");
        }

        if url::Url::parse(&self.github).is_err() {
            diag.error_with_hint(
                "terminal.github",
                format!("`{}` is not a valid URL", self.github),
                "include the scheme, e.g. \"https://github.com/you\"",
            );
        }
    }
}
