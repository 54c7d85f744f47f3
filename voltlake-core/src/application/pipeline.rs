// voltlake-core/src/application/pipeline.rs
//
// The ingestion orchestrator. Walks the catalog strictly sequentially,
// staging phase first, driving every table unit through its lifecycle:
//
//   Pending -> Dropping -> ConstraintDropping -> Creating -> Populating
//           -> Testing -> Done        (Failed absorbs from any step)
//
// One connection, one unit at a time, commit after populate so the quality
// gate observes committed data, and fail-fast: the first Failed unit aborts
// the run. There are no retries; resilience comes from idempotence
// (create-if-not-exists plus the introspection-guarded constraint drop),
// which makes a rerun after a transient failure safe.

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use crate::application::introspection;
use crate::application::ports::TemplateEngine;
use crate::application::quality;
use crate::domain::catalog::{Catalog, TableUnit};
use crate::domain::placeholder::PlaceholderMap;
use crate::error::VoltlakeError;
use crate::ports::connector::Connector;

const TEMPLATE_CREATE_SCHEMA: &str = "CREATE SCHEMA IF NOT EXISTS {{ SCHEMA }}";

/// Lifecycle position of a single table unit during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Pending,
    Dropping,
    ConstraintDropping,
    Creating,
    Populating,
    Testing,
    Done,
    Failed,
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitState::Pending => "pending",
            UnitState::Dropping => "dropping",
            UnitState::ConstraintDropping => "constraint_dropping",
            UnitState::Creating => "creating",
            UnitState::Populating => "populating",
            UnitState::Testing => "testing",
            UnitState::Done => "done",
            UnitState::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub units_completed: usize,
    pub started_at: String,
}

/// Run the full staging-then-main catalog against one warehouse connection.
///
/// Stops at the first failed unit and surfaces the triggering error; units
/// after it are never touched.
pub async fn run_catalog<T: TemplateEngine>(
    connector: &dyn Connector,
    engine: &T,
    catalog: &Catalog,
    vars: &PlaceholderMap,
) -> Result<RunResult, VoltlakeError> {
    println!(
        "🚀 Starting warehouse ingestion ({} staging + {} main units)...",
        catalog.staging.len(),
        catalog.main.len()
    );
    let start_time = Instant::now();
    let started_at = chrono::Utc::now().to_rfc3339();

    // Target schema first, so introspection and every unit statement can
    // assume it exists.
    let create_schema = engine.render(TEMPLATE_CREATE_SCHEMA, vars)?;
    connector.execute(&create_schema).await?;

    // One introspection pass per run, and only when some unit actually
    // declares a constraint drop. Constraints recreated by this run's own
    // create statements are dropped again on the *next* run, not now.
    let existing_constraints = if catalog.units().any(|u| u.drop_constraint.is_some()) {
        introspection::list_existing_constraints(connector, engine, vars).await?
    } else {
        HashSet::new()
    };

    let mut units_completed = 0;

    let phases: [(&str, &[TableUnit]); 2] =
        [("staging", &catalog.staging), ("main", &catalog.main)];

    for (phase, units) in phases {
        println!("  🔹 Phase '{}' ({} units)...", phase, units.len());

        for unit in units {
            execute_unit(connector, engine, unit, vars, &existing_constraints).await?;
            println!("    ✅ Ingested table: {}", unit.name);
            units_completed += 1;
        }
    }

    println!(
        "✨ Done in {:.2}s. Ingested {} tables.",
        start_time.elapsed().as_secs_f64(),
        units_completed
    );

    Ok(RunResult {
        success: true,
        units_completed,
        started_at,
    })
}

async fn execute_unit<T: TemplateEngine>(
    connector: &dyn Connector,
    engine: &T,
    unit: &TableUnit,
    vars: &PlaceholderMap,
    existing_constraints: &HashSet<String>,
) -> Result<(), VoltlakeError> {
    let mut state = UnitState::Pending;

    match drive_unit(connector, engine, unit, vars, existing_constraints, &mut state).await {
        Ok(()) => {
            state = UnitState::Done;
            tracing::info!(unit = %unit.name, state = %state, "unit finished");
            Ok(())
        }
        Err(e) => {
            let failed_in = state;
            state = UnitState::Failed;
            tracing::error!(
                unit = %unit.name,
                state = %state,
                failed_in = %failed_in,
                error = %e,
                "unit failed, aborting run"
            );
            Err(e)
        }
    }
}

async fn drive_unit<T: TemplateEngine>(
    connector: &dyn Connector,
    engine: &T,
    unit: &TableUnit,
    vars: &PlaceholderMap,
    existing_constraints: &HashSet<String>,
    state: &mut UnitState,
) -> Result<(), VoltlakeError> {
    enter(unit, state, UnitState::Dropping);
    if let Some(drop_statement) = &unit.drop_statement {
        run_statement(connector, engine, drop_statement, vars).await?;
    }

    enter(unit, state, UnitState::ConstraintDropping);
    if let Some(constraint) = &unit.drop_constraint {
        if existing_constraints.contains(&constraint.name) {
            run_statement(connector, engine, &constraint.statement, vars).await?;
        } else {
            tracing::debug!(
                unit = %unit.name,
                constraint = %constraint.name,
                "constraint not present, skipping drop"
            );
        }
    }

    enter(unit, state, UnitState::Creating);
    run_statement(connector, engine, &unit.create_statement, vars).await?;

    enter(unit, state, UnitState::Populating);
    run_statement(connector, engine, &unit.populate_statement, vars).await?;

    // Quality tests must observe committed data.
    connector.commit().await?;

    enter(unit, state, UnitState::Testing);
    quality::run_quality_tests(connector, engine, &unit.quality_tests, &unit.name, vars).await?;

    Ok(())
}

fn enter(unit: &TableUnit, state: &mut UnitState, next: UnitState) {
    *state = next;
    tracing::debug!(unit = %unit.name, state = %next, "state transition");
}

async fn run_statement<T: TemplateEngine>(
    connector: &dyn Connector,
    engine: &T,
    template: &str,
    vars: &PlaceholderMap,
) -> Result<(), VoltlakeError> {
    let statement = engine.render(template, vars)?;
    tracing::debug!(statement = %statement, "executing");

    if let Err(e) = connector.execute(&statement).await {
        // Log the rendered text: the operator needs it to diagnose and rerun.
        tracing::error!(error = %e, statement = %statement, "statement execution failed");
        return Err(e);
    }
    Ok(())
}
