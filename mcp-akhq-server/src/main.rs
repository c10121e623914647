//! mcp-akhq-server - MCP Server for AKHQ
//!
//! Exposes the AKHQ HTTP API via the Model Context Protocol (MCP)

use mcp_akhq_server::config::Transport;
use mcp_akhq_server::{build_handler, logging, transport, Config};
use std::path::Path;
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "mcp-akhq.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1);
    let mut config = match &config_path {
        Some(path) => Config::from_file(Path::new(path))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => Config::default(),
    };
    config.apply_env()?;
    config.validate()?;

    // Initialize logging
    logging::init(&config.logging)?;

    info!("🚀 Starting mcp-akhq-server v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Configuration loaded from {}", path),
        None => info!("No config file specified, using defaults and environment"),
    }
    info!("📊 Using AKHQ at: {}", config.akhq.base_url);

    let handler = build_handler(&config)?;
    info!("📋 {} tools registered", handler.registry().len());

    match config.server.transport {
        Transport::Stdio => transport::serve_stdio(handler).await?,
        Transport::Http => transport::serve_http(handler, &config.server.listen_addr).await?,
    }

    Ok(())
}
