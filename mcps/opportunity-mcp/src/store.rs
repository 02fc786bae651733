//! Opportunity store over an external SQL service
//!
//! The store holds no records. Each operation is one statement (plus the
//! one-time schema check) sent through a [`SqlExecutor`].

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use tokio::sync::OnceCell;

use crate::error::Result;
use crate::executor::{SqlExecutor, SqlRequest};
use crate::normalize::normalize_response;
use crate::types::{NewOpportunity, Opportunity};
use crate::validation;

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS opportunities (
    id TEXT PRIMARY KEY,
    empresa TEXT,
    pessoa TEXT,
    telefone TEXT,
    email TEXT,
    interesse TEXT,
    created_at TEXT
)"#;

const INSERT_SQL: &str = "INSERT INTO opportunities (id, empresa, pessoa, telefone, email, interesse, created_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const SELECT_SQL: &str = "SELECT id, empresa, pessoa, telefone, email, interesse, created_at \
     FROM opportunities ORDER BY created_at DESC LIMIT ?1";

/// Opportunity store with a shared schema guard
#[derive(Clone)]
pub struct OpportunityStore {
    executor: Arc<dyn SqlExecutor>,
    schema: Arc<OnceCell<()>>,
}

impl OpportunityStore {
    pub fn new(executor: Arc<dyn SqlExecutor>) -> Self {
        Self {
            executor,
            schema: Arc::new(OnceCell::new()),
        }
    }

    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    /// Create the opportunities table if it does not exist
    ///
    /// Runs the statement once per store; concurrent first callers wait on
    /// the same attempt. A failed attempt is not cached.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.schema
            .get_or_try_init(|| async {
                tracing::debug!(executor = self.executor.name(), "Ensuring opportunities table");
                self.executor
                    .run_sql(&SqlRequest::new(CREATE_TABLE_SQL))
                    .await
                    .map(|_| ())
            })
            .await?;
        Ok(())
    }

    /// Insert a new opportunity and return its generated id
    pub async fn create(&self, opportunity: NewOpportunity) -> Result<String> {
        validation::validate_email(&opportunity.email)?;
        self.ensure_schema().await?;

        let id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);

        let request = SqlRequest::with_params(
            INSERT_SQL,
            vec![
                json!(id),
                json!(opportunity.empresa),
                json!(opportunity.pessoa),
                json!(opportunity.telefone),
                json!(opportunity.email),
                json!(opportunity.interesse),
                json!(created_at),
            ],
        );
        self.executor.run_sql(&request).await?;

        tracing::info!(id = %id, empresa = %opportunity.empresa, "Created opportunity");
        Ok(id)
    }

    /// Fetch the newest rows as the SQL service returned them
    pub async fn list_raw(&self, limit: Option<u32>) -> Result<Value> {
        let limit = validation::check_limit(limit)?;
        self.ensure_schema().await?;

        self.executor
            .run_sql(&SqlRequest::with_params(SELECT_SQL, vec![json!(limit)]))
            .await
    }

    /// Fetch the newest opportunities, newest first
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<Opportunity>> {
        let raw = self.list_raw(limit).await?;
        let items = normalize_response(&raw);
        tracing::debug!(count = items.len(), "Listed opportunities");
        Ok(items)
    }

    /// Run arbitrary SQL and return the raw response
    ///
    /// No validation and no schema check. Callers gate this behind the
    /// operator flag.
    pub async fn run_raw(&self, sql: String, params: Option<Vec<Value>>) -> Result<Value> {
        tracing::warn!(sql = %sql, "Running raw SQL");
        self.executor.run_sql(&SqlRequest { sql, params }).await
    }
}
