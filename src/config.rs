//! Configuration Module
//!
//! Loads proxy configuration from command-line flags with environment
//! variable fallbacks.

use std::time::Duration;

use clap::Parser;

use crate::error::{ProxyError, Result};

// == Defaults ==
pub const DEFAULT_STORE_ADDR: &str = "localhost:6379";
pub const DEFAULT_LISTEN_ADDR: &str = "localhost:8080";
pub const DEFAULT_NETWORK: &str = "tcp";
pub const DEFAULT_EXPIRY_SECS: u64 = 10;
pub const DEFAULT_CAPACITY: usize = 5;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 1000;

/// Proxy configuration parameters.
///
/// Immutable for the lifetime of the process. Every flag can also be
/// supplied through the environment variable named next to it.
#[derive(Debug, Clone, Parser)]
#[command(name = "redis_proxy", version, about = "Read-through caching proxy for Redis")]
pub struct Config {
    /// Address of the backing Redis instance (host:port, or a socket path for unix)
    #[arg(long, env = "STORE_ADDR", default_value = DEFAULT_STORE_ADDR)]
    pub store_addr: String,

    /// Address the HTTP proxy listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Network used to reach the store: "tcp" or "unix"
    #[arg(long, env = "STORE_NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Freshness window in seconds
    #[arg(long, env = "CACHE_EXPIRY", default_value_t = DEFAULT_EXPIRY_SECS)]
    pub expiry: u64,

    /// Maximum number of cached keys
    #[arg(long, env = "CACHE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Upper bound on a single store round-trip, in milliseconds
    #[arg(long, env = "STORE_TIMEOUT_MS", default_value_t = DEFAULT_STORE_TIMEOUT_MS)]
    pub store_timeout_ms: u64,
}

impl Config {
    // == Validate ==
    /// Rejects configurations the proxy cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ProxyError::Configuration(
                "cache capacity must be a positive integer".to_string(),
            ));
        }
        if self.network != "tcp" && self.network != "unix" {
            return Err(ProxyError::Configuration(format!(
                "unsupported store network '{}' (expected tcp or unix)",
                self.network
            )));
        }
        if self.store_timeout_ms == 0 {
            return Err(ProxyError::Configuration(
                "store timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Freshness window as a Duration.
    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.expiry)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    // == Store URL ==
    /// Connection URL for the redis client.
    pub fn store_url(&self) -> String {
        match self.network.as_str() {
            "unix" => format!("redis+unix://{}", self.store_addr),
            _ => format!("redis://{}/", self.store_addr),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_addr: DEFAULT_STORE_ADDR.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            expiry: DEFAULT_EXPIRY_SECS,
            capacity: DEFAULT_CAPACITY,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.store_addr, "localhost:6379");
        assert_eq!(config.listen_addr, "localhost:8080");
        assert_eq!(config.network, "tcp");
        assert_eq!(config.expiry, 10);
        assert_eq!(config.capacity, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_flags() {
        let config = Config::try_parse_from([
            "redis_proxy",
            "--store-addr",
            "redis.internal:6380",
            "--listen-addr",
            "0.0.0.0:9000",
            "--expiry",
            "30",
            "--capacity",
            "100",
        ])
        .unwrap();

        assert_eq!(config.store_addr, "redis.internal:6380");
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.freshness_window(), Duration::from_secs(30));
        assert_eq!(config.capacity, 100);
    }

    #[test]
    fn test_negative_capacity_rejected_by_parser() {
        let result = Config::try_parse_from(["redis_proxy", "--capacity", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_capacity_is_configuration_error() {
        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ProxyError::Configuration(_))
        ));
    }

    #[test]
    fn test_unknown_network_rejected() {
        let config = Config {
            network: "udp".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ProxyError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_expiry_is_valid() {
        let config = Config {
            expiry: 0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_url() {
        let tcp = Config::default();
        assert_eq!(tcp.store_url(), "redis://localhost:6379/");

        let unix = Config {
            network: "unix".to_string(),
            store_addr: "/tmp/redis.sock".to_string(),
            ..Config::default()
        };
        assert_eq!(unix.store_url(), "redis+unix:///tmp/redis.sock");
    }
}
