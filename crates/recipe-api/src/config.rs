//! # API Configuration
//!
//! Environment-based configuration for the recipes API service.

use anyhow::Context;
use std::env;
use std::net::SocketAddr;

use recipe_persistence::{DeletePolicy, ReadStrategy, SNAPSHOT_KEY, ServiceOptions, WriteStrategy};

/// API server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub server_addr: SocketAddr,

    /// ScyllaDB configuration
    pub scylla: ScyllaConfig,

    /// Redis configuration
    pub redis: RedisConfig,

    /// Recipe list cache behaviour
    pub cache: CacheSettings,

    /// Logging level
    pub log_level: String,

    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

/// ScyllaDB connection configuration
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Create the `recipes` table at startup when missing
    pub bootstrap_schema: bool,
}

/// Redis connection configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Recipe list cache settings
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Use Redis at all; off means every list reads ScyllaDB
    pub enabled: bool,
    /// Snapshot key
    pub key: String,
    /// Serve from ScyllaDB when Redis fails instead of failing the request
    pub bypass_on_error: bool,
    /// Clear the snapshot on delete as well as on create/update
    pub invalidate_on_delete: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `SERVER_ADDR` is not a valid socket address.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if `SERVER_ADDR` is not a valid socket address.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let flag = |name: &str, default: bool| {
            lookup(name)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(default)
        };

        let server_addr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        Ok(Self {
            server_addr: server_addr
                .parse()
                .with_context(|| format!("Invalid SERVER_ADDR: {server_addr}"))?,

            scylla: ScyllaConfig {
                hosts: lookup("SCYLLA_HOSTS")
                    .unwrap_or_else(|| "127.0.0.1:9042".to_string())
                    .split(',')
                    .map(String::from)
                    .collect(),
                keyspace: lookup("SCYLLA_KEYSPACE").unwrap_or_else(|| "recipes".to_string()),
                username: lookup("SCYLLA_USERNAME"),
                password: lookup("SCYLLA_PASSWORD"),
                bootstrap_schema: flag("SCYLLA_BOOTSTRAP_SCHEMA", true),
            },

            redis: RedisConfig {
                url: lookup("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            },

            cache: CacheSettings {
                enabled: flag("CACHE_ENABLED", true),
                key: lookup("CACHE_KEY").unwrap_or_else(|| SNAPSHOT_KEY.to_string()),
                bypass_on_error: flag("CACHE_BYPASS_ON_ERROR", false),
                invalidate_on_delete: flag("INVALIDATE_ON_DELETE", true),
            },

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            cors_origins: lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(String::from)
                .collect(),
        })
    }

    /// Service tunables derived from the cache settings
    pub fn service_options(&self) -> ServiceOptions {
        let read_strategy = match (self.cache.enabled, self.cache.bypass_on_error) {
            (false, _) => ReadStrategy::DbOnly,
            (true, true) => ReadStrategy::CacheFirstBypass,
            (true, false) => ReadStrategy::CacheFirst,
        };
        let write_strategy = if self.cache.enabled {
            WriteStrategy::WriteAround
        } else {
            WriteStrategy::DbOnly
        };
        let delete_policy = if self.cache.invalidate_on_delete {
            DeletePolicy::Invalidate
        } else {
            DeletePolicy::Retain
        };

        ServiceOptions::default()
            .with_read_strategy(read_strategy)
            .with_write_strategy(write_strategy)
            .with_delete_policy(delete_policy)
            .with_snapshot_key(self.cache.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_addr.port(), 8080);
        assert_eq!(config.scylla.hosts, vec!["127.0.0.1:9042"]);
        assert_eq!(config.cache.key, "recipes");

        let options = config.service_options();
        assert_eq!(options.read_strategy, ReadStrategy::CacheFirst);
        assert_eq!(options.write_strategy, WriteStrategy::WriteAround);
        assert_eq!(options.delete_policy, DeletePolicy::Invalidate);
    }

    #[test]
    fn test_cache_switches() {
        let config = config_from(&[
            ("CACHE_BYPASS_ON_ERROR", "true"),
            ("INVALIDATE_ON_DELETE", "0"),
            ("CACHE_KEY", "recipes:v2"),
        ])
        .unwrap();
        let options = config.service_options();

        assert_eq!(options.read_strategy, ReadStrategy::CacheFirstBypass);
        assert_eq!(options.delete_policy, DeletePolicy::Retain);
        assert_eq!(options.snapshot_key, "recipes:v2");

        let disabled = config_from(&[("CACHE_ENABLED", "false")]).unwrap();
        let options = disabled.service_options();
        assert_eq!(options.read_strategy, ReadStrategy::DbOnly);
        assert_eq!(options.write_strategy, WriteStrategy::DbOnly);
    }

    #[test]
    fn test_invalid_server_addr() {
        assert!(config_from(&[("SERVER_ADDR", "nowhere")]).is_err());
    }

    #[test]
    fn test_host_list() {
        let config = config_from(&[("SCYLLA_HOSTS", "a:9042,b:9042")]).unwrap();
        assert_eq!(config.scylla.hosts, vec!["a:9042", "b:9042"]);
    }
}
