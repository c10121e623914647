//! Tool registry

use super::Tool;
use crate::error::{AdapterError, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Ordered registry of tools, built once at startup
#[derive(Debug, Default)]
pub struct ToolRegistry {
    /// Tools in registration order
    tools: Vec<Tool>,
    /// Tool name -> index in `tools`
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; names must be unique
    pub fn register(&mut self, tool: Tool) -> Result<()> {
        if self.index.contains_key(tool.name) {
            return Err(AdapterError::DuplicateTool(tool.name.to_string()));
        }

        debug!("Registering tool: {}", tool.name);
        self.index.insert(tool.name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Register every tool in `tools`
    pub fn register_all(&mut self, tools: impl IntoIterator<Item = Tool>) -> Result<()> {
        for tool in tools {
            self.register(tool)?;
        }
        Ok(())
    }

    /// Get all tools in registration order
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Get a specific tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool schemas for `tools/list`
    pub fn schemas(&self) -> Vec<Value> {
        self.tools.iter().map(Tool::to_schema).collect()
    }
}
