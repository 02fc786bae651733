//! Parameter definitions for opportunity-mcp tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::types::NewOpportunity;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateOpportunityParams {
    #[schemars(description = "Company name")]
    pub empresa: String,

    #[schemars(description = "Contact person")]
    pub pessoa: String,

    #[schemars(description = "Contact phone number")]
    pub telefone: String,

    #[schemars(description = "Contact email address")]
    pub email: String,

    #[schemars(description = "What the lead is interested in, free text")]
    pub interesse: String,
}

impl From<CreateOpportunityParams> for NewOpportunity {
    fn from(params: CreateOpportunityParams) -> Self {
        NewOpportunity {
            empresa: params.empresa,
            pessoa: params.pessoa,
            telefone: params.telefone,
            email: params.email,
            interesse: params.interesse,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ListOpportunitiesParams {
    #[schemars(description = "Maximum number of opportunities to return (positive integer, default 100)")]
    pub limit: Option<Number>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunRawSqlParams {
    #[schemars(description = "SQL statement to execute")]
    pub sql: String,

    #[schemars(description = "Positional parameters bound to ?1, ?2, ...")]
    #[serde(default)]
    pub params: Option<Vec<Value>>,
}
