//! HTTP front end.
//!
//! # Module Structure
//!
//! | Module      | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `lifecycle` | Port binding with retry, Ctrl+C shutdown       |
//! | `path`      | Static asset lookup                            |
//! | `request`   | URL, header and form helpers                   |
//! | `response`  | Response writers                               |
//! | `route`     | URL → [`Route`] mapping                        |
//! | `site`      | Config, templates and interpreter per process  |
//! | `template`  | Placeholder templates                          |
//!
//! Requests are accepted on the calling thread and handled on a rayon pool,
//! so a slow post render never blocks the terminal endpoint.

mod lifecycle;
mod path;
mod request;
mod response;
mod route;
mod site;
mod template;

pub use lifecycle::setup_shutdown_handler;
pub use route::{Route, route};
pub use site::Site;

use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tiny_http::{Method, Request, Server};

use crate::{content::ContentError, debug, log};
use request::RequestInfo;

/// Form field carrying the command line.
const COMMAND_FIELD: &str = "cmd";

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    site: Site,
}

/// Bind the HTTP server and register it for Ctrl+C shutdown.
pub fn bind_server(site: Site) -> Result<BoundServer> {
    let serve = &site.config().serve;
    let (server, addr) = lifecycle::bind_with_retry(serve.interface, serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        addr,
        site,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking until shutdown).
    ///
    /// Returns once the server is unblocked and every accepted request has
    /// been answered.
    pub fn run(self) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.site.config().serve.workers)
            .thread_name(|i| format!("sbx-worker-{i}"))
            .build()
            .context("Failed to create request thread pool")?;

        let addr = self.addr;
        let site = &self.site;
        pool.in_place_scope(|scope| {
            for request in self.server.incoming_requests() {
                scope.spawn(move |_| {
                    if let Err(e) = handle_request(request, site, addr) {
                        log!("serve"; "request error: {e:#}");
                    }
                });
            }
        });

        debug!("serve"; "request loop stopped");
        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, site: &Site, addr: SocketAddr) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let (raw_path, _) = request::split_target(request.url());
    let page = request::decode_path(raw_path).into_owned();
    debug!("serve"; "{} {}", request.method(), request.url());

    match route(&page, &site.config().terminal.mount) {
        Route::Static(rel) => match path::resolve_static(rel, &site.config().paths.static_dir) {
            Some(file) => response::respond_file(request, &file),
            None => response::respond_not_found_text(request),
        },
        Route::Redirect(location) => response::respond_redirect(request, 301, location),
        Route::Blog => match site.render_blog(&page) {
            Ok(html) => response::respond_html(request, 200, html),
            Err(e) => {
                log!("error"; "post list: {e}");
                response::respond_internal_error(request)
            }
        },
        Route::Post(slug) => handle_post(request, site, &page, slug),
        Route::NotFound => response::respond_html(request, 404, site.render_not_found(&page)),
        Route::Command => handle_command(request, site, addr),
        Route::Home => response::respond_html(request, 200, site.render_home(&page)),
    }
}

fn handle_post(request: Request, site: &Site, path: &str, slug: &str) -> Result<()> {
    match site.render_post(path, slug) {
        Ok(Some(html)) => response::respond_html(request, 200, html),
        Ok(None) | Err(ContentError::InvalidSlug(_)) => {
            response::respond_html(request, 404, site.render_not_found(path))
        }
        Err(e) => {
            log!("error"; "post `{slug}`: {e}");
            response::respond_not_found_text(request)
        }
    }
}

/// Terminal endpoint: POST only, everything else goes home.
fn handle_command(mut request: Request, site: &Site, addr: SocketAddr) -> Result<()> {
    if request.method() != &Method::Post {
        return response::respond_redirect(request, 303, "/");
    }

    let info = RequestInfo::from_request(&request, &addr.to_string());
    let cmd = request::form_value(&mut request, info.query.as_deref(), COMMAND_FIELD)?;

    let reply = site
        .interpreter()
        .execute(&cmd, &info.full_url, info.origin());
    let payload = reply
        .to_payload()
        .context("Failed to encode command response")?;

    response::respond_payload(request, payload)
}
