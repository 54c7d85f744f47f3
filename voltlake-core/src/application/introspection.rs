// voltlake-core/src/application/introspection.rs
//
// Reads the live catalog views to find which primary-key constraints
// currently exist. Constraint drops in the registry are unconditional;
// this lookup is what makes executing them idempotent across reruns.

use std::collections::HashSet;

use crate::application::ports::TemplateEngine;
use crate::domain::placeholder::PlaceholderMap;
use crate::error::VoltlakeError;
use crate::ports::connector::Connector;

// Scoped to the target schema: two environments sharing a warehouse must
// not see each other's constraints.
const SQL_EXISTING_PRIMARY_KEYS: &str = "\
select tco.constraint_name
from information_schema.table_constraints tco
where tco.constraint_type = 'PRIMARY KEY'
  and tco.constraint_schema = '{{ SCHEMA }}'";

/// Names of all primary-key constraints currently defined in the target
/// schema, as a set for O(1) membership tests.
pub async fn list_existing_constraints<T: TemplateEngine>(
    connector: &dyn Connector,
    engine: &T,
    vars: &PlaceholderMap,
) -> Result<HashSet<String>, VoltlakeError> {
    let query = engine.render(SQL_EXISTING_PRIMARY_KEYS, vars)?;

    let names = connector
        .fetch_text_column(&query)
        .await
        .map_err(|e| VoltlakeError::ConstraintLookup(e.to_string()))?;

    tracing::debug!(count = names.len(), "introspected primary key constraints");
    Ok(names.into_iter().collect())
}
