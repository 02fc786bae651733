//! Opportunity MCP - lead capture tools over a SQL service
//!
//! Serves create_opportunity, list_opportunities and (when enabled)
//! debug_db_run_sql over stdio.

use std::path::PathBuf;

use clap::Parser;
use opportunity_mcp::config::Config;
use opportunity_mcp::OpportunityMcpServer;
use rmcp::{transport::io::stdio, ServiceExt};

#[derive(Parser)]
#[command(name = "opportunity-mcp")]
#[command(about = "MCP server for capturing and listing sales opportunities")]
struct Args {
    /// Config file (otherwise searched in the standard locations)
    #[arg(long, short, env = "OPPORTUNITY_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Expose debug_db_run_sql; overrides the config file
    #[arg(long, env = "OPPORTUNITY_ALLOW_RAW_SQL")]
    allow_raw_sql: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, source) = Config::load(args.config.as_deref())?;
    if args.allow_raw_sql {
        config.debug.allow_raw_sql = true;
    }

    mcp_common::init_tracing_with("opportunity_mcp", config.logging.resolved_format())?;

    match &source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("Using default configuration"),
    }

    tracing::info!(backend = ?config.database.backend, "Starting Opportunity MCP server");

    let server = OpportunityMcpServer::with_config(&config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Opportunity MCP server running");

    service.waiting().await?;

    tracing::info!("Opportunity MCP server stopped");

    Ok(())
}
