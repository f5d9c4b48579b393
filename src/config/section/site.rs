//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "sbx blog"
//! description = "A simple blog built with Rust and Markdown."
//! ```

use serde::{Deserialize, Serialize};

/// Site metadata injected into every page template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Page title for the home page and the post list.
    pub title: String,

    /// `<meta name="description">` content.
    pub description: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: "sbx blog".into(),
            description: "A simple blog built with Rust and Markdown.".into(),
        }
    }
}
