//! `[serve]` section configuration.
//!
//! Contains HTTP server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 8081                 # HTTP port number
//! workers = 4                 # Request worker threads
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server reachable from the network.
//! The `PORT` environment variable overrides `port` when set.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Size of the request worker pool.
    pub workers: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8081,
            workers: 4,
        }
    }
}

impl ServeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.workers == 0 {
            diag.error("serve.workers", "must be at least 1");
        }
    }
}
