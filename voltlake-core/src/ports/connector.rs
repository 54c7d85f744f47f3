// voltlake-core/src/ports/connector.rs

// This file defines what the ingestion engine needs from a warehouse,
// without knowing how it's done. The orchestrator only ever talks to this
// trait; whether the other side is DuckDB, Postgres or a test double is
// an infrastructure concern.

use crate::error::VoltlakeError;
use async_trait::async_trait;

#[async_trait]
pub trait Connector: Send + Sync {
    /// Execute a single DDL/DML statement, discarding any result rows.
    async fn execute(&self, statement: &str) -> Result<(), VoltlakeError>;

    /// Fetch the first column of every returned row as booleans.
    /// Quality test queries are contractually boolean-valued.
    async fn fetch_bool_column(&self, query: &str) -> Result<Vec<bool>, VoltlakeError>;

    /// Fetch the first column of every returned row as text.
    /// Used for catalog introspection (constraint names).
    async fn fetch_text_column(&self, query: &str) -> Result<Vec<String>, VoltlakeError>;

    /// Make everything executed so far durable. Called once per table unit,
    /// after populate and before the quality gate runs.
    async fn commit(&self) -> Result<(), VoltlakeError>;
}
