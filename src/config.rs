//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::store::DEFAULT_TTL_SECS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds used for status display and as the reclaim default
    pub ttl_secs: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background reclaim interval in seconds; 0 disables the task so
    /// expired entries are only ever removed by an explicit reclaim
    pub reclaim_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TTL_SECONDS` - TTL in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `RECLAIM_INTERVAL` - Background reclaim frequency in seconds
    ///   (default: 0, disabled)
    pub fn from_env() -> Self {
        Self {
            ttl_secs: env::var("TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_SECS),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            reclaim_interval: env::var("RECLAIM_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            server_port: 3000,
            reclaim_interval: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.ttl_secs, 60);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.reclaim_interval, 0);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("TTL_SECONDS");
        env::remove_var("SERVER_PORT");
        env::remove_var("RECLAIM_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.ttl_secs, 60);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.reclaim_interval, 0);
    }
}
