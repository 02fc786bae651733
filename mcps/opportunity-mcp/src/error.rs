//! Error types for opportunity-mcp

use mcp_common::{internal_error, invalid_field, invalid_request, IntoMcpError, McpError};
use thiserror::Error;

/// Result type alias for opportunity operations
pub type Result<T> = std::result::Result<T, OpportunityError>;

#[derive(Error, Debug)]
pub enum OpportunityError {
    /// Input rejected before any SQL was issued
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("raw SQL is disabled; restart with --allow-raw-sql to enable debug_db_run_sql")]
    RawSqlDisabled,

    /// The SQL service answered but reported a failure
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl OpportunityError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        OpportunityError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Name of the offending input field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            OpportunityError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl IntoMcpError for OpportunityError {
    fn into_mcp_error(self) -> McpError {
        match &self {
            OpportunityError::Validation { field, .. } => invalid_field(field, self.to_string()),
            OpportunityError::RawSqlDisabled => invalid_request(self.to_string()),
            OpportunityError::Upstream(_)
            | OpportunityError::Http(_)
            | OpportunityError::Sqlite(_)
            | OpportunityError::Json(_)
            | OpportunityError::Config(_) => {
                tracing::warn!(error = %self, "SQL call failed");
                internal_error(self.to_string())
            }
        }
    }
}
