//! mcp-akhq-server: MCP adapter for the AKHQ HTTP API
//!
//! Every AKHQ endpoint is exposed as an MCP tool. A tool call validates its
//! arguments, fills the endpoint template (path placeholders and query
//! string), performs one HTTP request and returns the JSON reply as text.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! transport = "http"
//! listen_addr = "127.0.0.1:8090"
//!
//! [akhq]
//! base_url = "http://localhost:8080"
//! timeout_seconds = 30
//!
//! [logging]
//! level = "mcp_akhq_server=debug"
//! format = "json"
//! ```

pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod templater;
pub mod transport;
pub mod validation;

pub use config::Config;
pub use dispatcher::{BaseUrl, Dispatcher};
pub use error::{AdapterError, Result};
pub use mcp::{McpHandler, ToolRegistry};
pub use templater::{resolve_endpoint, TemplateError};

use std::time::Duration;

/// Build the handler serving the full AKHQ catalog
pub fn build_handler(config: &Config) -> Result<McpHandler> {
    let mut registry = ToolRegistry::new();
    registry.register_all(catalog::akhq_tools())?;

    let base_url = BaseUrl::new(config.akhq.base_url.clone());
    let dispatcher = Dispatcher::new(base_url, Duration::from_secs(config.akhq.timeout_seconds))?;

    Ok(McpHandler::new(registry, dispatcher))
}
