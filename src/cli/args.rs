//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Default page URL for `exec`: the terminal on the home page.
pub const DEFAULT_EXEC_URL: &str = "http://localhost:8081/commands/";

/// sbx blog server CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: sbx.toml)
    #[arg(short = 'C', long, global = true, default_value = "sbx.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve the blog and the terminal endpoint
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Run one terminal command and print the endpoint's reply
    #[command(visible_alias = "x")]
    Exec {
        /// Command line, e.g. `cd ..` or `echo hello`
        #[arg(required = true, num_args = 1..)]
        cmd: Vec<String>,

        /// URL of the command request, as the browser would send it
        #[arg(short, long, default_value = DEFAULT_EXEC_URL, value_hint = clap::ValueHint::Url)]
        url: String,
    },

    /// List posts in the content directory
    #[command(visible_alias = "p")]
    Posts,
}

impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
