//! MCP request handling
//!
//! Transport-independent: both stdio and HTTP feed [`McpRequest`]s into
//! [`McpHandler::handle`].

use super::{McpError, McpRequest, McpResponse, ToolAction, ToolRegistry, PROTOCOL_VERSION};
use crate::dispatcher::Dispatcher;
use crate::error::{AdapterError, Result};
use crate::templater::{resolve_endpoint, BODY_KEY};
use crate::validation::validate;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name announced in `initialize`
pub const SERVER_NAME: &str = "mcp-akhq-server";

/// Handles MCP requests against a fixed tool registry
#[derive(Debug, Clone)]
pub struct McpHandler {
    registry: Arc<ToolRegistry>,
    dispatcher: Dispatcher,
}

impl McpHandler {
    pub fn new(registry: ToolRegistry, dispatcher: Dispatcher) -> Self {
        Self {
            registry: Arc::new(registry),
            dispatcher,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Parse and handle one raw JSON-RPC message
    pub async fn handle_message(&self, raw: &str) -> Option<McpResponse> {
        match serde_json::from_str::<McpRequest>(raw) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Unparseable MCP message: {}", e);
                Some(McpResponse::error(
                    McpError::parse_error(format!("Parse error: {}", e)),
                    Value::Null,
                ))
            }
        }
    }

    /// Handle one request; notifications yield `None`
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        debug!("📥 MCP request: method={}", request.method);

        let Some(id) = request.id.clone() else {
            debug!("Notification received: {}", request.method);
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(McpResponse::error(
                McpError::invalid_request(format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
                id,
            ));
        }

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(request.params).await,
            _ => Err(McpError::method_not_found(format!(
                "Method not found: {}",
                request.method
            ))),
        };

        Some(match outcome {
            Ok(result) => McpResponse::success(result, id),
            Err(error) => McpResponse::error(error, id),
        })
    }

    fn handle_initialize(&self) -> Value {
        info!("🤝 MCP client initialized");
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        debug!("📋 Listing {} tools", self.registry.len());
        json!({ "tools": self.registry.schemas() })
    }

    async fn handle_tools_call(&self, params: Value) -> std::result::Result<Value, McpError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::invalid_params("Missing tool name".to_string()))?;

        if self.registry.get(name).is_none() {
            return Err(McpError::invalid_params(format!("Tool not found: {}", name)));
        }

        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.call_tool(name, &arguments).await {
            Ok(result) => {
                info!("✅ Tool executed: {}", name);
                let text = serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string());
                Ok(text_content(text, false))
            }
            Err(e) => {
                warn!("❌ Tool {} failed: {}", name, e);
                Ok(text_content(e.to_string(), true))
            }
        }
    }

    /// Validate `arguments`, run the tool and return the upstream JSON
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> Result<Value> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| AdapterError::ToolNotFound(name.to_string()))?;

        let params = validate(&tool.parameters, arguments)?;
        debug!("🔧 Calling tool: {} with args: {:?}", name, params);

        match &tool.action {
            ToolAction::Http {
                endpoint,
                method,
                content_type,
            } => {
                let path = resolve_endpoint(endpoint, &params)?;
                let body = params.get(BODY_KEY).filter(|b| !b.is_null());
                self.dispatcher
                    .request(&path, *method, body, *content_type)
                    .await
            }
            ToolAction::GetBaseUrl => {
                let url = self.dispatcher.base_url().get().await;
                Ok(json!({ "baseUrl": url }))
            }
            ToolAction::SetBaseUrl => {
                let url = params
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let previous = self.dispatcher.base_url().replace(url.clone()).await;
                info!("🔀 AKHQ base URL changed: {} -> {}", previous, url);
                Ok(json!({ "previousBaseUrl": previous, "baseUrl": url }))
            }
        }
    }
}

/// `tools/call` result carrying a single text block
fn text_content(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}
