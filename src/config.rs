//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::Context;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed number of entries the cache can hold
    pub capacity: usize,
    /// Interface the HTTP server binds to
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 4)
    /// - `SERVER_HOST` - Bind address (default: 127.0.0.1)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    ///
    /// Unparseable values fall back to their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            server_host: env::var("SERVER_HOST")
                .ok()
                .filter(|host| !host.trim().is_empty())
                .unwrap_or(defaults.server_host),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Address the HTTP server listens on.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .server_host
            .trim()
            .parse()
            .with_context(|| format!("invalid SERVER_HOST '{}'", self.server_host))?;
        Ok(SocketAddr::new(ip, self.server_port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 4,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
