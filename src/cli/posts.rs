//! `posts`: print the post index.

use anyhow::Result;
use std::io::Write;

use crate::{config::SiteConfig, content, log};

pub fn list_posts(config: &SiteConfig) -> Result<()> {
    let posts = content::list_posts(&config.paths.content)?;
    if posts.is_empty() {
        log!("posts"; "no posts in {}", config.paths.content.display());
        return Ok(());
    }

    let width = posts.iter().map(|p| p.slug.len()).max().unwrap_or(0);
    let mut stdout = std::io::stdout().lock();
    for post in &posts {
        writeln!(stdout, "{:<width$}  {}", post.slug, post.title)?;
    }
    Ok(())
}
