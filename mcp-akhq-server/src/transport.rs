//! MCP transports
//!
//! - stdio: one JSON-RPC message per line on stdin, responses on stdout
//! - HTTP: `POST /mcp` with the JSON-RPC message as body

use crate::mcp::McpHandler;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Serve MCP over the process's stdin/stdout until stdin closes
pub async fn serve_stdio(handler: McpHandler) -> std::io::Result<()> {
    info!("📡 MCP server listening on stdio");
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_lines(&handler, stdin, stdout).await
}

/// Answer newline-delimited JSON-RPC messages read from `reader`
pub async fn serve_lines<R, W>(handler: &McpHandler, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = handler.handle_message(line).await {
            let mut payload = serde_json::to_vec(&response)?;
            payload.push(b'\n');
            writer.write_all(&payload).await?;
            writer.flush().await?;
        }
    }

    debug!("stdin closed, stopping");
    Ok(())
}

/// Build the HTTP router
pub fn router(handler: McpHandler) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/mcp", post(mcp_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

/// Serve MCP over HTTP on `addr`
pub async fn serve_http(handler: McpHandler, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 MCP server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(handler)).await
}

/// Health check
async fn health_check(State(handler): State<McpHandler>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": crate::mcp::server::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "tools": handler.registry().len(),
    }))
}

/// MCP endpoint handler
async fn mcp_handler(State(handler): State<McpHandler>, body: String) -> Response {
    match handler.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{BaseUrl, Dispatcher};
    use crate::mcp::{Tool, ToolAction, ToolRegistry};
    use serde_json::Value;
    use std::time::Duration;

    fn handler() -> McpHandler {
        let mut registry = ToolRegistry::new();
        registry
            .register(Tool::local("get_base_url", "Base URL", ToolAction::GetBaseUrl))
            .unwrap();
        let dispatcher = Dispatcher::new(BaseUrl::default(), Duration::from_secs(1)).unwrap();
        McpHandler::new(registry, dispatcher)
    }

    #[tokio::test]
    async fn test_serve_lines_answers_requests_only() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","method":"initialize","params":{},"id":1}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"get_base_url"},"id":"b"}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve_lines(&handler(), input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["id"], "b");
        assert_eq!(responses[1]["result"]["isError"], false);
    }

    #[tokio::test]
    async fn test_serve_lines_reports_parse_errors() {
        let mut output = Vec::new();
        serve_lines(&handler(), "garbage\n".as_bytes(), &mut output).await.unwrap();

        let response: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(response["error"]["code"], -32700);
    }
}
