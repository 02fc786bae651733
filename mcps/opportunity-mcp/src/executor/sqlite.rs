//! Local SQLite executor
//!
//! Answers in the same envelope as the remote SQL service, so the store and
//! normalizer cannot tell the two apart. Rows come back as objects keyed by
//! column name, with the column list in `meta.columns`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use super::{SqlExecutor, SqlRequest};
use crate::error::Result;

#[derive(Clone)]
pub struct SqliteExecutor {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteExecutor {
    /// Open (or create) a database file, creating parent directories
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    crate::error::OpportunityError::Config(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "Opened SQLite database");
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn to_json_value(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => json!(i),
        SqlValue::Real(f) => json!(f),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(b) => Value::String(format!("<blob {} bytes>", b.len())),
    }
}

#[async_trait]
impl SqlExecutor for SqliteExecutor {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn run_sql(&self, request: &SqlRequest) -> Result<Value> {
        let conn = self.conn.lock().await;

        let params: Vec<SqlValue> = request
            .params
            .iter()
            .flatten()
            .map(to_sql_value)
            .collect();

        let mut stmt = conn.prepare(&request.sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut results = Vec::new();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        while let Some(row) = rows.next()? {
            let mut record = Map::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                let value: SqlValue = row.get(i)?;
                record.insert(column.clone(), to_json_value(value));
            }
            results.push(Value::Object(record));
        }
        drop(rows);
        let readonly = stmt.readonly();
        drop(stmt);

        // changes() keeps the count of the last write, so queries report 0
        let changes = if readonly { 0 } else { conn.changes() };

        Ok(json!({
            "result": [{
                "results": results,
                "meta": {
                    "columns": columns,
                    "changes": changes,
                    "last_row_id": conn.last_insert_rowid(),
                },
                "success": true,
            }]
        }))
    }
}
