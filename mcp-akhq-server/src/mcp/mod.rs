//! MCP (Model Context Protocol) implementation
//!
//! JSON-RPC 2.0 message types, tool descriptors, the tool registry and the
//! request handler shared by both transports.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod registry;
pub mod server;
pub mod tool;

pub use registry::ToolRegistry;
pub use server::McpHandler;
pub use tool::{HttpMethod, ParamType, Tool, ToolAction, ToolParameter};

/// Protocol revision announced in `initialize`
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP JSON-RPC request
///
/// A request without an `id` member is a notification and gets no response.
/// `"id": null` is a request like any other and is answered with `id: null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Value>,
}

/// Only reached when the member exists, so `null` becomes `Some(Value::Null)`.
fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl McpRequest {
    /// Create a new MCP request
    pub fn new(method: impl Into<String>, params: Value, id: impl Into<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id: Some(id.into()),
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// MCP JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
    pub id: Value,
}

impl McpResponse {
    /// Create a successful response
    pub fn success(result: Value, id: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(error: McpError, id: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// MCP error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    pub fn parse_error(message: String) -> Self {
        Self {
            code: -32700,
            message,
            data: None,
        }
    }

    pub fn invalid_request(message: String) -> Self {
        Self {
            code: -32600,
            message,
            data: None,
        }
    }

    pub fn method_not_found(message: String) -> Self {
        Self {
            code: -32601,
            message,
            data: None,
        }
    }

    pub fn invalid_params(message: String) -> Self {
        Self {
            code: -32602,
            message,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_id_is_notification() {
        let request: McpRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})).unwrap();
        assert!(request.is_notification());
        assert_eq!(request.params, Value::Null);
    }

    #[test]
    fn test_string_ids_round_trip() {
        let request: McpRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "ping", "id": "abc"})).unwrap();
        assert_eq!(request.id, Some(json!("abc")));
    }

    #[test]
    fn test_null_id_is_not_notification() {
        let request: McpRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "ping", "id": null})).unwrap();
        assert!(!request.is_notification());
        assert_eq!(request.id, Some(Value::Null));
    }

    #[test]
    fn test_error_response_shape() {
        let response = McpResponse::error(McpError::method_not_found("nope".to_string()), json!(7));
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "error": {"code": -32601, "message": "nope"}, "id": 7}));
    }
}
