//! Process configuration
//!
//! Loaded once at startup and passed explicitly to everything that needs it.

use anyhow::Context;
use std::env;
use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface to bind
    pub host: String,

    /// TCP port to listen on
    pub port: u16,

    /// Prefix under which the key routes are mounted ("" for root)
    pub api_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_path: String::new(),
        }
    }
}

impl Config {
    /// Load the configuration from `HOST`, `PORT` and `API_PATH`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value '{}'", p))?,
            None => defaults.port,
        };
        let api_path = lookup("API_PATH")
            .map(|p| normalize_api_path(&p))
            .unwrap_or(defaults.api_path);

        Ok(Config { host, port, api_path })
    }

    /// Socket address to bind the HTTP server to
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

/// Normalize a path prefix: leading slash, no trailing slash, root becomes ""
fn normalize_api_path(path: &str) -> String {
    let cleaned = path.trim().trim_matches('/');
    if cleaned.is_empty() {
        String::new()
    } else {
        format!("/{}", cleaned)
    }
}
