//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum total weight of cached entries in bytes
    pub max_size: i64,
    /// Maximum idle time of an entry in seconds, 0 disables age eviction
    pub max_age: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE` - Maximum cache weight in bytes (default: 64 MiB)
    /// - `MAX_AGE` - Maximum idle time in seconds, 0 = never (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env::var("MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_size),
            max_age: env::var("MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_age),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Idle limit as a `Duration`.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: 64 * 1024 * 1024,
            max_age: 300,
            server_port: 3000,
        }
    }
}
