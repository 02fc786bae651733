//! Error handling utilities for MCP servers
//!
//! Maps domain errors onto MCP error codes so tool implementations can use `?`.

use rmcp::ErrorData as McpError;
use serde_json::json;

/// Type alias for MCP tool results
pub type McpResult<T> = Result<T, McpError>;

/// Trait for converting errors into MCP-compatible errors
///
/// Servers implement this for their own error enum and pick the MCP error
/// code per variant (client mistakes as `invalid_params`, upstream failures
/// as `internal_error`).
///
/// ```rust,ignore
/// impl IntoMcpError for StoreError {
///     fn into_mcp_error(self) -> McpError {
///         match self {
///             StoreError::BadInput { field, message } => invalid_field(field, message),
///             other => internal_error(other.to_string()),
///         }
///     }
/// }
/// ```
pub trait IntoMcpError {
    /// Convert this error into an MCP error
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

impl IntoMcpError for anyhow::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(self.to_string(), None)
    }
}

impl IntoMcpError for String {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(self, None)
    }
}

/// Extension trait for Result types to convert to MCP errors
///
/// ```rust,ignore
/// let id = store.create(new_opportunity).await.to_mcp_err()?;
/// ```
pub trait ResultExt<T> {
    /// Convert the error to an MCP error
    fn to_mcp_err(self) -> Result<T, McpError>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> Result<T, McpError> {
        self.map_err(|e| e.into_mcp_error())
    }
}

/// Create an internal error with a message
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Create an invalid params error with a message
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// Create an invalid params error that names the offending field
///
/// The field name is carried in the error data as `{"field": "<name>"}` so
/// callers can highlight the right input.
pub fn invalid_field(field: &str, message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), Some(json!({ "field": field })))
}

/// Create an invalid request error, for calls the server refuses to serve
pub fn invalid_request(message: impl Into<String>) -> McpError {
    McpError::invalid_request(message.into(), None)
}
