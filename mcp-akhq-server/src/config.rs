//! Configuration for mcp-akhq-server

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::debug;

use crate::error::{AdapterError, Result};

/// Default AKHQ address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub akhq: AkhqConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How MCP clients reach this server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
    /// JSON-RPC over `POST /mcp`
    Http,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_transport")]
    pub transport: Transport,
    /// Listen address for the HTTP transport (e.g., "127.0.0.1:8090")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Upstream AKHQ configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AkhqConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_transport() -> Transport {
    Transport::Stdio
}

fn default_listen_addr() -> String {
    "127.0.0.1:8090".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "mcp_akhq_server=info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for AkhqConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AdapterError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AdapterError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AKHQ_BASE_URL") {
            debug!("AKHQ_BASE_URL override: {}", url);
            self.akhq.base_url = url;
        }

        if let Some(timeout) = lookup("AKHQ_TIMEOUT_SECONDS") {
            self.akhq.timeout_seconds = timeout.parse().map_err(|e| {
                AdapterError::Config(format!("Invalid AKHQ_TIMEOUT_SECONDS '{}': {}", timeout, e))
            })?;
        }

        if let Some(transport) = lookup("MCP_TRANSPORT") {
            self.server.transport = match transport.to_lowercase().as_str() {
                "stdio" => Transport::Stdio,
                "http" => Transport::Http,
                other => {
                    return Err(AdapterError::Config(format!(
                        "Unknown MCP_TRANSPORT '{}' (expected stdio or http)",
                        other
                    )))
                }
            };
        }

        if let Some(addr) = lookup("MCP_LISTEN_ADDR") {
            self.server.listen_addr = addr;
        }

        if let Some(format) = lookup("MCP_LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                other => {
                    return Err(AdapterError::Config(format!(
                        "Unknown MCP_LOG_FORMAT '{}' (expected pretty or json)",
                        other
                    )))
                }
            };
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.akhq.timeout_seconds == 0 {
            return Err(AdapterError::Config("timeout_seconds must be positive".to_string()));
        }

        if self.server.transport == Transport::Http {
            self.server.listen_addr.parse::<SocketAddr>().map_err(|e| {
                AdapterError::Config(format!(
                    "Invalid listen address '{}': {}",
                    self.server.listen_addr, e
                ))
            })?;
        }

        Ok(())
    }
}
