//! `exec`: run one terminal command without a server.
//!
//! Prints exactly what the command endpoint would send back, which makes the
//! interpreter easy to poke at from a shell:
//!
//! ```text
//! $ sbxblog exec cd .. --url http://localhost:8081/commands/blog/post
//! {"action":"navigate","url":"http://localhost:8081/blog"}
//! ```

use anyhow::{Context, Result};
use std::io::Write;

use crate::{
    config::SiteConfig,
    terminal::{Interpreter, Origin, Payload},
};

/// Remote address reported in the terminal log for local invocations.
const LOCAL_ORIGIN: &str = "local";

/// Run `cmd` as if posted from the page at `url`.
pub fn run_command(cmd: &[String], url: &str, config: &SiteConfig) -> Result<()> {
    let payload = execute(cmd, url, config)?;

    let mut stdout = std::io::stdout().lock();
    match payload {
        Payload::Json(body) | Payload::Html(body) if !body.is_empty() => {
            writeln!(stdout, "{body}")?;
        }
        _ => {}
    }
    Ok(())
}

fn execute(cmd: &[String], url: &str, config: &SiteConfig) -> Result<Payload> {
    let interpreter = Interpreter::new(config.terminal.clone());
    let origin = Origin {
        remote_addr: LOCAL_ORIGIN,
        user_agent: concat!("sbxblog/", env!("CARGO_PKG_VERSION")),
    };

    interpreter
        .execute(&cmd.join(" "), url, origin)
        .to_payload()
        .context("Failed to encode command response")
}
