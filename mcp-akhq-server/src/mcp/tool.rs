//! MCP Tool definitions

use serde_json::{json, Map, Value};
use std::fmt;

/// HTTP method used to reach an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// What happens when a tool is called
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAction {
    /// Resolve the endpoint template and call AKHQ
    Http {
        endpoint: &'static str,
        method: HttpMethod,
        content_type: Option<&'static str>,
    },
    /// Report the current AKHQ base URL
    GetBaseUrl,
    /// Replace the AKHQ base URL
    SetBaseUrl,
}

/// Declared type of a tool parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    StringArray,
    Object,
    /// String restricted to a fixed set of values
    Enum(&'static [&'static str]),
}

impl ParamType {
    /// Name used in JSON Schema and in validation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamType::String | ParamType::Enum(_) => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::StringArray => "array",
            ParamType::Object => "object",
        }
    }

    fn to_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!(self.type_name()));
        match self {
            ParamType::StringArray => {
                schema.insert("items".to_string(), json!({ "type": "string" }));
            }
            ParamType::Enum(values) => {
                schema.insert("enum".to_string(), json!(values));
            }
            _ => {}
        }
        schema
    }
}

/// Tool parameter definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParameter {
    pub name: &'static str,
    pub description: &'static str,
    pub param_type: ParamType,
    pub required: bool,
}

impl ToolParameter {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        param_type: ParamType,
        required: bool,
    ) -> Self {
        Self {
            name,
            description,
            param_type,
            required,
        }
    }

    pub const fn string(name: &'static str, description: &'static str, required: bool) -> Self {
        Self::new(name, description, ParamType::String, required)
    }

    pub const fn integer(name: &'static str, description: &'static str, required: bool) -> Self {
        Self::new(name, description, ParamType::Integer, required)
    }

    pub const fn number(name: &'static str, description: &'static str, required: bool) -> Self {
        Self::new(name, description, ParamType::Number, required)
    }

    pub const fn boolean(name: &'static str, description: &'static str, required: bool) -> Self {
        Self::new(name, description, ParamType::Boolean, required)
    }

    pub const fn string_array(name: &'static str, description: &'static str, required: bool) -> Self {
        Self::new(name, description, ParamType::StringArray, required)
    }

    pub const fn object(name: &'static str, description: &'static str, required: bool) -> Self {
        Self::new(name, description, ParamType::Object, required)
    }

    pub const fn one_of(
        name: &'static str,
        description: &'static str,
        values: &'static [&'static str],
        required: bool,
    ) -> Self {
        Self::new(name, description, ParamType::Enum(values), required)
    }
}

/// A tool exposed to MCP clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Tool name (e.g., "get_topic")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Input parameters, in declaration order
    pub parameters: Vec<ToolParameter>,
    pub action: ToolAction,
}

impl Tool {
    /// A tool backed by one AKHQ endpoint
    pub fn http(
        name: &'static str,
        description: &'static str,
        method: HttpMethod,
        endpoint: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            parameters: Vec::new(),
            action: ToolAction::Http {
                endpoint,
                method,
                content_type: None,
            },
        }
    }

    pub fn get(name: &'static str, description: &'static str, endpoint: &'static str) -> Self {
        Self::http(name, description, HttpMethod::Get, endpoint)
    }

    pub fn post(name: &'static str, description: &'static str, endpoint: &'static str) -> Self {
        Self::http(name, description, HttpMethod::Post, endpoint)
    }

    pub fn delete(name: &'static str, description: &'static str, endpoint: &'static str) -> Self {
        Self::http(name, description, HttpMethod::Delete, endpoint)
    }

    /// A tool handled in-process
    pub fn local(name: &'static str, description: &'static str, action: ToolAction) -> Self {
        Self {
            name,
            description,
            parameters: Vec::new(),
            action,
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_content_type(mut self, value: &'static str) -> Self {
        if let ToolAction::Http { content_type, .. } = &mut self.action {
            *content_type = Some(value);
        }
        self
    }

    /// Convert to the MCP `tools/list` entry
    pub fn to_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let mut schema = param.param_type.to_schema();
            schema.insert("description".to_string(), json!(param.description));
            properties.insert(param.name.to_string(), Value::Object(schema));
            if param.required {
                required.push(param.name);
            }
        }

        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }
        })
    }
}
