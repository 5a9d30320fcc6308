//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection URL for the durable store
    pub database_url: String,
    /// Maximum pooled database connections (forced to 1 for in-memory URLs)
    pub db_max_connections: u32,
    /// Page size used when assembling a timeline
    pub timeline_page_size: u32,
    /// Per-request deadline in seconds
    pub request_timeout: u64,
    /// Base URL of a remote follow-graph service, if the timeline should use one
    pub graph_service_url: Option<String>,
    /// Base URL of a remote content service, if the timeline should use one
    pub content_service_url: Option<String>,
    /// Timeout in seconds for calls to remote collaborators
    pub downstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - SQLite URL (default: `sqlite::memory:`)
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `TIMELINE_PAGE_SIZE` - Items per timeline (default: 20)
    /// - `REQUEST_TIMEOUT_SECS` - Per-request deadline (default: 30, 0 is ignored)
    /// - `GRAPH_SERVICE_URL` - Remote follow-graph base URL (default: unset)
    /// - `CONTENT_SERVICE_URL` - Remote content base URL (default: unset)
    /// - `DOWNSTREAM_TIMEOUT_SECS` - Remote call timeout (default: 10, 0 is ignored)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.db_max_connections),
            timeline_page_size: parse_var("TIMELINE_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.timeline_page_size),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout),
            graph_service_url: non_empty_var("GRAPH_SERVICE_URL"),
            content_service_url: non_empty_var("CONTENT_SERVICE_URL"),
            downstream_timeout: parse_var("DOWNSTREAM_TIMEOUT_SECS")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.downstream_timeout),
        }
    }

    /// True when the database lives only as long as the process.
    pub fn is_in_memory_db(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 5,
            timeline_page_size: 20,
            request_timeout: 30,
            graph_service_url: None,
            content_service_url: None,
            downstream_timeout: 10,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.timeline_page_size, 20);
        assert!(config.graph_service_url.is_none());
        assert!(config.content_service_url.is_none());
        assert!(config.is_in_memory_db());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_URL");
        env::remove_var("TIMELINE_PAGE_SIZE");
        env::remove_var("GRAPH_SERVICE_URL");
        env::remove_var("CONTENT_SERVICE_URL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.timeline_page_size, 20);
        assert!(config.graph_service_url.is_none());
    }

    #[test]
    fn test_zero_timeouts_fall_back_to_defaults() {
        env::set_var("REQUEST_TIMEOUT_SECS", "0");
        env::set_var("DOWNSTREAM_TIMEOUT_SECS", "0");

        let config = Config::from_env();

        env::remove_var("REQUEST_TIMEOUT_SECS");
        env::remove_var("DOWNSTREAM_TIMEOUT_SECS");
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.downstream_timeout, 10);
    }

    #[test]
    fn test_file_database_is_not_in_memory() {
        let config = Config {
            database_url: "sqlite://data/graph.db?mode=rwc".to_string(),
            ..Config::default()
        };
        assert!(!config.is_in_memory_db());
    }
}
