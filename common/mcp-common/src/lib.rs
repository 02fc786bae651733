//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] for stderr logging in text or JSON
//! - **Results**: [`json_success`] and [`json_payload`] for JSON tool payloads
//! - **Errors**: [`IntoMcpError`] and helpers that map failures to MCP codes
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! ```rust,ignore
//! use mcp_common::{json_success, ResultExt};
//!
//! async fn create(&self, params: CreateParams) -> Result<CallToolResult, McpError> {
//!     let id = self.store.create(params.into()).await.to_mcp_err()?;
//!     json_success(&CreatedResponse { id })
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{
    internal_error, invalid_field, invalid_params, invalid_request, IntoMcpError, McpResult,
    ResultExt,
};
pub use init::{init_tracing, init_tracing_with, LogFormat};
pub use result::{json_payload, json_success, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
