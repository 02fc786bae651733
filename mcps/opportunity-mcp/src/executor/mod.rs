//! SQL executor implementations
//!
//! The store never talks to a database directly. It hands `{sql, params}`
//! requests to a [`SqlExecutor`] and gets back the service's raw JSON
//! response, shaped like:
//!
//! ```json
//! { "result": [ { "results": [ ... ], "meta": { "columns": [ ... ] } } ] }
//! ```
//!
//! Rows inside `results` vary by service; see [`crate::normalize`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::{Backend, DatabaseConfig};
use crate::error::Result;

pub mod http;
pub mod sqlite;

pub use http::HttpSqlExecutor;
pub use sqlite::SqliteExecutor;

/// A single statement with optional positional parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlRequest {
    pub sql: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

impl SqlRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: None,
        }
    }

    pub fn with_params(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params: Some(params),
        }
    }
}

/// Trait for SQL executors
///
/// Errors are returned as-is from the underlying service; executors never
/// retry.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Get the name of this executor
    fn name(&self) -> &str;

    /// Run one statement and return the raw response
    async fn run_sql(&self, request: &SqlRequest) -> Result<Value>;
}

/// Build the executor selected by the database config
pub fn from_config(config: &DatabaseConfig) -> Result<Arc<dyn SqlExecutor>> {
    match config.backend {
        Backend::Http => Ok(Arc::new(HttpSqlExecutor::new(&config.http)?)),
        Backend::Sqlite => Ok(Arc::new(SqliteExecutor::open(&config.sqlite_path())?)),
    }
}
