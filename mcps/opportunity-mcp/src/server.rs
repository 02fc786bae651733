//! MCP Server implementation for opportunity capture
//!
//! This module defines the main MCP server that exposes the opportunity
//! store as tools. Handler implementations are in the handlers module.

use mcp_common::{
    async_trait, CallToolResult, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError, Tool,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;

use crate::config::Config;
use crate::executor;
use crate::handlers;
use crate::params::*;
use crate::store::OpportunityStore;

const RAW_SQL_TOOL: &str = "debug_db_run_sql";

/// The main Opportunity MCP Server
#[derive(Clone)]
pub struct OpportunityMcpServer {
    store: OpportunityStore,
    allow_raw_sql: bool,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router - Each tool delegates to its handler
// ============================================================================

#[tool_router]
impl OpportunityMcpServer {
    /// Create a server from the discovered config file, or defaults
    pub fn new() -> Result<Self, anyhow::Error> {
        let (config, _) = Config::load(None)?;
        Self::with_config(&config)
    }

    /// Create a server with explicit config
    pub fn with_config(config: &Config) -> Result<Self, anyhow::Error> {
        let executor = executor::from_config(&config.database)?;
        Ok(Self::with_store(
            OpportunityStore::new(executor),
            config.debug.allow_raw_sql,
        ))
    }

    /// Create a server around an existing store
    pub fn with_store(store: OpportunityStore, allow_raw_sql: bool) -> Self {
        let mut tool_router = Self::tool_router();
        if allow_raw_sql {
            tracing::warn!("{} is enabled; do not run this configuration in production", RAW_SQL_TOOL);
        } else {
            tool_router.remove_route(RAW_SQL_TOOL);
        }

        Self {
            store,
            allow_raw_sql,
            tool_router,
        }
    }

    pub fn allow_raw_sql(&self) -> bool {
        self.allow_raw_sql
    }

    #[tool(description = "Create an opportunity from lead data (company, contact, phone, email, interest) and persist it. Returns the generated id.")]
    async fn create_opportunity(
        &self,
        Parameters(params): Parameters<CreateOpportunityParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::create_opportunity(&self.store, params).await
    }

    #[tool(description = "List stored opportunities, newest first. Optional limit (default 100).")]
    async fn list_opportunities(
        &self,
        Parameters(params): Parameters<ListOpportunitiesParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::list_opportunities(&self.store, params).await
    }

    #[tool(description = "Run arbitrary SQL and return the raw result. Debug only; disabled unless the server was started with --allow-raw-sql.")]
    async fn debug_db_run_sql(
        &self,
        Parameters(params): Parameters<RunRawSqlParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::run_raw_sql(&self.store, self.allow_raw_sql, params).await
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for OpportunityMcpServer {
    fn get_info(&self) -> ServerInfo {
        let debug = if self.allow_raw_sql { "enabled" } else { "disabled" };
        ServerInfo {
            instructions: Some(format!(
                "Opportunity capture MCP server backed by a SQL service ({}). \
                 Use create_opportunity to store a lead and list_opportunities to read \
                 them back newest first. Raw SQL debugging is {}.",
                self.store.executor_name(),
                debug
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for OpportunityMcpServer {
    fn server_name(&self) -> &str {
        "opportunity"
    }

    fn server_description(&self) -> Option<&str> {
        Some("Lead capture MCP server - stores opportunities and lists them for a kanban board.")
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "create_opportunity" => {
                let params: CreateOpportunityParams = serde_json::from_value(params)?;
                self.create_opportunity(Parameters(params)).await.map_err(Into::into)
            }

            "list_opportunities" => {
                let params: ListOpportunitiesParams = if params.is_null() {
                    ListOpportunitiesParams::default()
                } else {
                    serde_json::from_value(params)?
                };
                self.list_opportunities(Parameters(params)).await.map_err(Into::into)
            }

            RAW_SQL_TOOL => {
                let params: RunRawSqlParams = serde_json::from_value(params)?;
                self.debug_db_run_sql(Parameters(params)).await.map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
