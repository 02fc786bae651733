//! Opportunity MCP Library
//!
//! Lead capture for a kanban board: tools to store opportunities in a SQL
//! service and list them back newest first, whatever row encoding the
//! service answers with.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use opportunity_mcp::{OpportunityMcpServer, OpportunityStore, SqliteExecutor};
//!
//! let executor = Arc::new(SqliteExecutor::open_in_memory()?);
//! let server = OpportunityMcpServer::with_store(OpportunityStore::new(executor), false);
//! // Use with EmbeddableMcp or serve via stdio
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod normalize;
pub mod params;
pub mod server;
pub mod store;
pub mod types;
pub mod validation;

// Re-export main server type
pub use server::OpportunityMcpServer;

pub use error::{OpportunityError, Result};
pub use executor::{HttpSqlExecutor, SqlExecutor, SqlRequest, SqliteExecutor};
pub use normalize::{normalize_response, RowShape};
pub use store::OpportunityStore;
pub use types::{NewOpportunity, Opportunity};

// Re-export parameter types for direct API usage
pub use params::*;
