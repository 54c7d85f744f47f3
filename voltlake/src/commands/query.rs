// voltlake/src/commands/query.rs
//
// USE CASE: Execute a raw SQL statement (ad-hoc).

use voltlake_core::application::execute_query;
use voltlake_core::infrastructure::adapters::duckdb::DuckDbConnector;

pub async fn execute(query: String, db_path: String) -> anyhow::Result<()> {
    let connector = DuckDbConnector::new(&db_path)?;

    if let Err(e) = execute_query(&connector, &query).await {
        eprintln!("❌ Query failed: {}", e);
        std::process::exit(1);
    }

    println!("✅ OK");
    Ok(())
}
