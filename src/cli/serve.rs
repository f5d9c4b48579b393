//! `serve`: run the blog until Ctrl+C.

use anyhow::Result;

use crate::{
    config::SiteConfig,
    debug, log,
    server::{self, Site},
};

pub fn serve_site(config: SiteConfig) -> Result<()> {
    server::setup_shutdown_handler()?;

    if !config.paths.content.is_dir() {
        log!("warning"; "content directory {} does not exist", config.paths.content.display());
    }

    let workers = config.serve.workers;
    let site = Site::new(config)?;
    let bound = server::bind_server(site)?;
    debug!("serve"; "{} workers on {}", workers, bound.addr());
    bound.run()
}
