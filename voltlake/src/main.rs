// voltlake/src/main.rs
//
// Thin binary: parse the CLI, set up logging, dispatch to a command.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug voltlake run ... for rendered statements and timings.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_dir,
            db_path,
        } => commands::run::execute(project_dir, db_path).await,

        Commands::Plan { project_dir } => commands::plan::execute(project_dir).await,

        Commands::Query { query, db_path } => commands::query::execute(query, db_path).await,
    }
}
