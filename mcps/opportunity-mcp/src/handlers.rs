//! Handler implementations for opportunity-mcp tools
//!
//! Each handler validates its params, calls the store and wraps the result
//! as a JSON tool response.

use mcp_common::{json_success, CallToolResult, McpError, ResultExt};

use crate::error::OpportunityError;
use crate::params::*;
use crate::store::OpportunityStore;
use crate::types::{CreateOpportunityResponse, ListOpportunitiesResponse, RawSqlResponse};
use crate::validation;

pub async fn create_opportunity(
    store: &OpportunityStore,
    params: CreateOpportunityParams,
) -> Result<CallToolResult, McpError> {
    let id = store.create(params.into()).await.to_mcp_err()?;

    json_success(&CreateOpportunityResponse { id })
}

pub async fn list_opportunities(
    store: &OpportunityStore,
    params: ListOpportunitiesParams,
) -> Result<CallToolResult, McpError> {
    let limit = validation::parse_limit(params.limit.as_ref()).to_mcp_err()?;

    let items = store.list(Some(limit)).await.to_mcp_err()?;

    json_success(&ListOpportunitiesResponse { items })
}

pub async fn run_raw_sql(
    store: &OpportunityStore,
    allow_raw_sql: bool,
    params: RunRawSqlParams,
) -> Result<CallToolResult, McpError> {
    if !allow_raw_sql {
        return Err(OpportunityError::RawSqlDisabled).to_mcp_err();
    }

    let result = store.run_raw(params.sql, params.params).await.to_mcp_err()?;

    json_success(&RawSqlResponse { result })
}
