// voltlake/src/commands/plan.rs
//
// USE CASE: Compile the catalog to SQL artifacts without touching a database.
//
// Writes one file per table unit under target/compiled/<phase>/, with every
// statement rendered against the configured placeholders. A missing
// placeholder fails the plan, so this doubles as a configuration check.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use voltlake_core::application::ports::TemplateEngine;
use voltlake_core::domain::catalog::{Catalog, TableUnit};
use voltlake_core::domain::placeholder::PlaceholderMap;
use voltlake_core::infrastructure::compiler::renderer::SqlRenderer;
use voltlake_core::infrastructure::config::load_warehouse_config;

pub async fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config = load_warehouse_config(&project_dir).with_context(|| {
        format!(
            "Failed to load warehouse configuration from {:?}",
            project_dir
        )
    })?;

    let vars = config.placeholders();
    let missing = vars.missing_required();
    if !missing.is_empty() {
        anyhow::bail!("Configuration is missing placeholders: {:?}", missing);
    }

    let renderer = SqlRenderer::new();
    let catalog = Catalog::standard();
    let compiled_dir = project_dir.join("target").join("compiled");

    let mut files_written = 0;
    for (phase, units) in [("staging", &catalog.staging), ("main", &catalog.main)] {
        let phase_dir = compiled_dir.join(phase);
        std::fs::create_dir_all(&phase_dir)?;

        for unit in units {
            let sql = compile_unit(&renderer, unit, &vars)?;
            let path = phase_dir.join(format!("{}.sql", unit.name));
            std::fs::write(&path, sql)
                .with_context(|| format!("Failed to write {:?}", path))?;
            files_written += 1;
        }
    }

    println!(
        "✨ Compiled {} units into {}",
        files_written,
        relative_display(&compiled_dir, &project_dir)
    );
    Ok(())
}

fn compile_unit(
    renderer: &SqlRenderer<'_>,
    unit: &TableUnit,
    vars: &PlaceholderMap,
) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "-- table: {}", unit.name)?;

    if let Some(drop_statement) = &unit.drop_statement {
        writeln!(out, "\n{};", renderer.render(drop_statement, vars)?)?;
    }
    if let Some(constraint) = &unit.drop_constraint {
        writeln!(
            out,
            "\n-- only executed when '{}' exists in the target schema",
            constraint.name
        )?;
        writeln!(out, "{};", renderer.render(&constraint.statement, vars)?)?;
    }

    writeln!(out, "\n{};", renderer.render(&unit.create_statement, vars)?)?;
    writeln!(out, "\n{};", renderer.render(&unit.populate_statement, vars)?)?;

    for test in &unit.quality_tests {
        let scoped = vars.with_table(&unit.name);
        writeln!(out, "\n-- quality test: {}", test.name)?;
        writeln!(out, "{};", renderer.render(&test.sql_template, &scoped)?)?;
    }

    Ok(out)
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
