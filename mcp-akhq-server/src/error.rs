//! Error types for mcp-akhq-server

use crate::templater::TemplateError;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Adapter error types
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Endpoint template could not be resolved
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Tool arguments did not match the declared parameters
    #[error("Invalid arguments:\n{0}")]
    Validation(ValidationErrors),

    /// Transport failure talking to AKHQ
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// AKHQ answered with something that is not JSON
    #[error("Invalid JSON from {url} (status {status}): {source}")]
    InvalidJson {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Unknown tool name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Two tools registered under the same name
    #[error("Duplicate tool: {0}")]
    DuplicateTool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationErrors> for AdapterError {
    fn from(errors: ValidationErrors) -> Self {
        AdapterError::Validation(errors)
    }
}
