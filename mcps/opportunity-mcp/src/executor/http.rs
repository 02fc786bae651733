//! HTTP SQL executor
//!
//! Posts `{sql, params}` as JSON to a remote SQL execution endpoint and
//! returns its JSON response verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{SqlExecutor, SqlRequest};
use crate::config::HttpConfig;
use crate::error::{OpportunityError, Result};

pub struct HttpSqlExecutor {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpSqlExecutor {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(OpportunityError::Config(
                "database.http.url must be set for the http backend".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(concat!("opportunity-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Surface an explicit `success: false` envelope as an upstream error
fn check_envelope(body: Value) -> Result<Value> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let detail = body
            .get("errors")
            .or_else(|| body.get("error"))
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no error detail".to_string());
        return Err(OpportunityError::Upstream(format!(
            "SQL service reported failure: {}",
            detail
        )));
    }
    Ok(body)
}

#[async_trait]
impl SqlExecutor for HttpSqlExecutor {
    fn name(&self) -> &str {
        "http"
    }

    async fn run_sql(&self, request: &SqlRequest) -> Result<Value> {
        tracing::debug!(url = %self.url, sql = %request.sql, "Posting SQL");

        let mut builder = self.client.post(&self.url).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(OpportunityError::Upstream(format!(
                "SQL service error {}: {}",
                status, text
            )));
        }

        let body: Value = response.json().await?;
        check_envelope(body)
    }
}
