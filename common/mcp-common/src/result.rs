//! Result helpers for MCP tool responses

use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;
use serde_json::Value;

/// Create a successful JSON response from any serializable data
///
/// The payload is pretty-printed into a single text content item.
///
/// ```rust,ignore
/// json_success(&ListOpportunitiesResponse { items })
/// ```
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Create a successful plain text response
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Parse the JSON payload back out of a tool result
///
/// Inverse of [`json_success`]: reads the first text content item as JSON.
/// Returns `None` when there is no text content or it is not valid JSON.
pub fn json_payload(result: &CallToolResult) -> Option<Value> {
    result
        .content
        .iter()
        .find_map(|content| content.as_text())
        .and_then(|text| serde_json::from_str(&text.text).ok())
}
