//! Server lifecycle: binding and shutdown.
//!
//! `SHUTDOWN` is set by the Ctrl+C handler. Requests still in flight see it
//! and answer 503; the blocking accept loop is released via `unblock()`.

use anyhow::Result;
use std::{
    net::{IpAddr, SocketAddr},
    sync::{
        Arc, OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};
use tiny_http::Server;

use crate::log;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let Some(port) = base_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                // Port 0 means "any free port"; report the one actually bound.
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some((port, e)),
        }
    }

    match last_error {
        Some((port, e)) => Err(anyhow::anyhow!(
            "Failed to bind after {} attempts (ports {}-{}): {}",
            MAX_PORT_RETRIES,
            base_port,
            port,
            e
        )),
        None => Err(anyhow::anyhow!("No port available from {base_port}")),
    }
}

/// Setup the global Ctrl+C handler. Call once before serving.
///
/// Before a server is registered the process exits immediately; afterwards
/// the handler unblocks the accept loop so `serve` can return normally.
pub fn setup_shutdown_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(server) = SERVER.get() {
            log!("serve"; "shutting down...");
            server.unblock();
        } else {
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the HTTP server for graceful shutdown.
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn test_bind_with_retry_skips_busy_port() {
        let (_first, addr) = bind_with_retry(LOCALHOST, 0).unwrap();
        let taken = addr.port();
        assert_ne!(taken, 0);

        let (_second, next) = bind_with_retry(LOCALHOST, taken).unwrap();
        let (taken, next) = (u32::from(taken), u32::from(next.port()));
        assert!(next > taken && next < taken + u32::from(MAX_PORT_RETRIES));
    }

    #[test]
    fn test_not_shutdown_by_default() {
        assert!(!is_shutdown());
    }
}
