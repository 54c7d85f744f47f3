// voltlake-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::VoltlakeError;
use crate::ports::connector::Connector;

/// Execute a raw SQL statement with instrumentation (logs + timing).
/// This wrapper lets us watch the performance of all ad-hoc statements.
#[instrument(skip(connector), fields(query.len = query.len()))]
pub async fn execute_query(connector: &dyn Connector, query: &str) -> Result<(), VoltlakeError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = connector.execute(query).await;

    let duration = start.elapsed();

    match result {
        Ok(_) => {
            debug!("✅ Query finished in {:.2?}", duration);
            Ok(())
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
