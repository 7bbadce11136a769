//! Configuration management for findserver
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The candidate server list lives here and is
//! passed explicitly to the finder.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::models::Endpoint;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Probe configuration
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Candidate servers in declaration order
    #[serde(default)]
    pub servers: Vec<Endpoint>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Probe-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Per-probe timeout in milliseconds
    pub timeout_ms: u64,

    /// User agent string
    pub user_agent: String,

    /// Redirect hops to follow (0 treats any 3xx as unreachable)
    pub max_redirects: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            user_agent: format!("findserver/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

impl ProbeConfig {
    /// Get probe timeout as Duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

/// Parse a comma separated list of `priority=address` pairs
pub fn parse_server_list(list: &str) -> Result<Vec<Endpoint>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            entry
                .parse::<Endpoint>()
                .map_err(|e| Error::config(format!("Invalid server '{entry}': {e}")))
        })
        .collect()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = ProbeConfig::default();

        let timeout_ms = std::env::var("FINDSERVER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_ms);

        let user_agent = std::env::var("FINDSERVER_USER_AGENT").unwrap_or(defaults.user_agent);

        let max_redirects = std::env::var("FINDSERVER_MAX_REDIRECTS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_redirects);

        let servers = match std::env::var("FINDSERVER_SERVERS") {
            Ok(list) => parse_server_list(&list)?,
            Err(_) => default_servers(),
        };

        let log_level =
            std::env::var("FINDSERVER_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("FINDSERVER_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            probe: ProbeConfig {
                timeout_ms,
                user_agent,
                max_redirects,
            },
            servers,
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Toml` if it
    /// is not a valid config
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// An empty server list is allowed; it simply selects nothing.
    pub fn validate(&self) -> Result<()> {
        if self.probe.timeout_ms == 0 {
            return Err(Error::config("timeout_ms must be greater than 0"));
        }

        for server in &self.servers {
            let url = Url::parse(server.address()).map_err(|e| {
                Error::config(format!("Invalid server address {}: {e}", server.address()))
            })?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::config(format!(
                    "Server address must use http or https: {}",
                    server.address()
                )));
            }
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(Error::config(format!(
                "log format must be 'text' or 'json', got '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Get probe timeout as Duration
    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        self.probe.timeout()
    }
}

/// Servers probed when nothing else is configured
fn default_servers() -> Vec<Endpoint> {
    vec![
        Endpoint::new("https://does-not-work.perfume.new", 1),
        Endpoint::new("https://gitlab.com", 4),
        Endpoint::new("http://app.scnt.me", 3),
        Endpoint::new("https://offline.scentronix.com", 2),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe: ProbeConfig::default(),
            servers: default_servers(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.servers.len(), 4);
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = Config::default();
        config.probe.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_server_address() {
        let mut config = Config::default();
        config.servers.push(Endpoint::new("gitlab.com", 9));
        assert!(config.validate().is_err());

        config.servers.pop();
        config.servers.push(Endpoint::new("ftp://files.example.com", 9));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_servers_is_valid() {
        let mut config = Config::default();
        config.servers.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "yaml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probe_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_server_list() {
        let servers =
            parse_server_list("1=https://a.example.com, 2=https://b.example.com,").unwrap();
        assert_eq!(
            servers,
            vec![
                Endpoint::new("https://a.example.com", 1),
                Endpoint::new("https://b.example.com", 2),
            ]
        );

        assert!(matches!(
            parse_server_list("https://a.example.com"),
            Err(Error::Config(_))
        ));
        assert!(parse_server_list("").unwrap().is_empty());
    }

    #[test]
    fn test_toml_defaults_fill_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [[servers]]
            address = "https://gitlab.com"
            priority = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.servers, vec![Endpoint::new("https://gitlab.com", 4)]);
        assert_eq!(config.probe.timeout_ms, 5000);
        assert_eq!(config.logging.format, "text");
    }
}
