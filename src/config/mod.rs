//! Site configuration management for `sbx.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── paths      # [paths]
//! │   ├── serve      # [serve]
//! │   ├── site       # [site]
//! │   └── terminal   # [terminal]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # config file lookup
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The config file is optional: without one every section uses its defaults
//! and paths resolve against the current directory. Precedence, lowest first:
//! defaults, `sbx.toml`, `PORT` env var, CLI flags.

pub mod section;
mod error;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{PathsConfig, ServeConfig, SiteInfoConfig, TerminalConfig};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::find_config_file;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sbx.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file, which may not exist (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site title and description
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Directory layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Terminal widget settings
    #[serde(default)]
    pub terminal: TerminalConfig,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's directory, or cwd when there is no config file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_env_port(std::env::var("PORT").ok().as_deref())?;
        config.apply_cli(cli);

        let root = config.root.clone();
        config.normalize_paths(&root);
        config.validate()?;
        if cli.is_serve() {
            config.validate_serve()?;
        }

        debug!("config"; "root {}, config file {}", config.root.display(), config.config_path.display());
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // overrides
    // ========================================================================

    /// Apply the `PORT` environment variable, if set.
    fn apply_env_port(&mut self, value: Option<&str>) -> Result<()> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        self.serve.port = value.parse().map_err(|_| {
            ConfigError::Validation(format!("PORT must be a port number, got `{value}`"))
        })?;
        Ok(())
    }

    /// Apply command-line overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.paths.content, cli.content.as_ref());

        if let Commands::Serve {
            interface,
            port,
            verbose,
        } = &cli.command
        {
            crate::logger::set_verbose(*verbose);
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = crate::utils::path::normalize_path(root);
        self.paths.normalize(&root);
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.serve.validate(&mut diag);
        self.terminal.validate(&mut diag);

        diag.into_result()
    }

    /// Checks that only matter when pages are rendered.
    pub fn validate_serve(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.paths.validate(&mut diag);
        diag.into_result()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
