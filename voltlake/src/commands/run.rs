// voltlake/src/commands/run.rs
//
// USE CASE: Run the full ingestion pipeline.

use std::path::PathBuf;

use anyhow::Context;
use voltlake_core::application::run_catalog;
use voltlake_core::domain::catalog::Catalog;
use voltlake_core::infrastructure::adapters::duckdb::DuckDbConnector;
use voltlake_core::infrastructure::compiler::renderer::SqlRenderer;
use voltlake_core::infrastructure::config::load_warehouse_config;
use voltlake_core::VoltlakeError;

pub async fn execute(project_dir: PathBuf, db_path: Option<String>) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_warehouse_config(&project_dir).with_context(|| {
        format!(
            "Failed to load warehouse configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Schema: {}", config.schema);

    let vars = config.placeholders();
    let missing = vars.missing_required();
    if !missing.is_empty() {
        anyhow::bail!("Configuration is missing placeholders: {:?}", missing);
    }

    // B. Instantiate the DB Adapter (DuckDB)
    let database = db_path.unwrap_or_else(|| config.database.clone());
    let database = if database == ":memory:" || PathBuf::from(&database).is_absolute() {
        database
    } else {
        project_dir.join(&database).to_string_lossy().into_owned()
    };
    println!("   Engine: DuckDB 🦆 ({})", database);
    let connector = DuckDbConnector::new(&database)
        .with_context(|| format!("Failed to initialize DuckDB at {}", database))?;

    // C. Run the Catalog (Application Layer)
    let renderer = SqlRenderer::new();
    let catalog = Catalog::standard();

    match run_catalog(&connector, &renderer, &catalog, &vars).await {
        Ok(run_res) => {
            save_run_results(&project_dir, &run_res)?;
            println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
            Ok(())
        }
        Err(VoltlakeError::Domain(e)) => {
            // Quality failures carry diagnostics (code + help), show them.
            eprintln!("\n❌ DATA QUALITY FAILURE:");
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn save_run_results(
    project_dir: &PathBuf,
    run_res: &voltlake_core::application::RunResult,
) -> anyhow::Result<()> {
    let target_dir = project_dir.join("target");
    std::fs::create_dir_all(&target_dir)?;

    let path = target_dir.join("run_results.json");
    let json = serde_json::to_string_pretty(run_res)?;
    std::fs::write(&path, json)?;

    tracing::debug!(path = ?path, "run results saved");
    Ok(())
}
