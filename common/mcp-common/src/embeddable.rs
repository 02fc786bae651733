//! Embeddable MCP trait for in-process execution
//!
//! [`EmbeddableMcp`] lets a host (a web view backend, a test harness) call an
//! MCP server's tools directly, without a stdio transport in between.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use opportunity_mcp::OpportunityMcpServer;
//!
//! let server = OpportunityMcpServer::new()?;
//! let listing = server
//!     .call_tool_json("list_opportunities", serde_json::json!({}))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

use crate::result::json_payload;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Invalid parameters passed to the tool
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool execution failed
    #[error("tool execution failed: {0}")]
    ExecutionError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// MCP protocol error, with the original error preserved
    #[error("mcp error: {}", .0.message)]
    McpError(rmcp::ErrorData),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err)
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// Implementations must be `Send + Sync` so tools can be called from
/// multiple tasks at once. Servers built on `#[tool_router]` implement it by
/// delegating `list_tools` to their router and dispatching `call_tool` by name.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Returns the server name for identification
    fn server_name(&self) -> &str;

    /// Returns a list of all tools the server will currently serve
    fn list_tools(&self) -> Vec<Tool>;

    /// Executes a tool by name with the given JSON parameters
    ///
    /// Fails with [`EmbeddableError::ToolNotFound`] for unknown names,
    /// [`EmbeddableError::SerdeError`] when the parameters do not match the
    /// tool's input type, and [`EmbeddableError::McpError`] when the tool
    /// itself rejects the call.
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Executes a tool and decodes its JSON payload
    async fn call_tool_json(&self, name: &str, params: Value) -> EmbeddableResult<Value> {
        let result = self.call_tool(name, params).await?;
        json_payload(&result).ok_or_else(|| {
            EmbeddableError::ExecutionError(format!("tool '{}' returned no JSON payload", name))
        })
    }

    /// Returns an optional description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }

    /// Returns the server version, if available
    fn server_version(&self) -> Option<&str> {
        None
    }
}
