//! sbxblog - a Markdown blog server with a homepage terminal.

mod cli;
mod config;
mod content;
mod logger;
mod server;
mod terminal;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve_site(config),
        Commands::Exec { cmd, url } => cli::exec::run_command(cmd, url, &config),
        Commands::Posts => cli::posts::list_posts(&config),
    }
}
