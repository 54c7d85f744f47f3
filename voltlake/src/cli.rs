// voltlake/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "voltlake")]
#[command(about = "EV charging warehouse ingestion engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the full ingestion pipeline (staging -> main -> quality gates)
    Run {
        /// Project directory holding voltlake.yaml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Override the database file from configuration
        #[arg(long)]
        db_path: Option<String>,
    },

    /// 📝 Renders every catalog statement to target/compiled (no database)
    Plan {
        /// Project directory holding voltlake.yaml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// ⚡ Executes a raw SQL statement (Ad-hoc)
    Query {
        query: String,
        #[arg(long, default_value = "voltlake.duckdb")]
        db_path: String,
    },
}
