//! Type definitions for opportunity-mcp

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A captured lead, as returned to the board
///
/// Every field but `id` may be null when the SQL service omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Opportunity {
    pub id: String,
    /// Company name
    pub empresa: Option<String>,
    /// Contact person
    pub pessoa: Option<String>,
    /// Phone number
    pub telefone: Option<String>,
    pub email: Option<String>,
    /// Interest or notes
    pub interesse: Option<String>,
    /// RFC 3339 UTC insertion time
    pub created_at: Option<String>,
}

/// New opportunity input
#[derive(Debug, Clone)]
pub struct NewOpportunity {
    pub empresa: String,
    pub pessoa: String,
    pub telefone: String,
    pub email: String,
    pub interesse: String,
}

/// Response for create_opportunity
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateOpportunityResponse {
    pub id: String,
}

/// Response for list_opportunities
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListOpportunitiesResponse {
    pub items: Vec<Opportunity>,
}

/// Response for debug_db_run_sql: the SQL service response, untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSqlResponse {
    pub result: Value,
}
