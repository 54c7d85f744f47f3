// voltlake/tests/cli_tests.rs
//
// End-to-end CLI checks against a scratch project directory.

use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

struct ScratchProject {
    _tmp: TempDir,
    root: PathBuf,
}

impl ScratchProject {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        Ok(Self { _tmp: tmp, root })
    }

    fn with_config(self) -> Result<Self> {
        let config = r#"
schema: ev_charging
iam_role: arn:aws:iam::123456789012:role/warehouse-loader
sources:
  status_charging_points: s3://voltlake/status_cp.csv
  status_connectors: s3://voltlake/status_connectors.csv
  master_charging_stations: s3://voltlake/stations.csv
  master_charging_points: s3://voltlake/charging_points.csv
  master_connectors: s3://voltlake/connectors.csv
  poi_points: s3://voltlake/poi_points.csv
  poi_polygons: s3://voltlake/poi_polygons.csv
  poi_multipolygons: s3://voltlake/poi_multipolygons.csv
  poi_station_mapping: s3://voltlake/poi_cs_mapping.csv
"#;
        std::fs::write(self.root.join("voltlake.yaml"), config)?;
        Ok(self)
    }

    fn voltlake(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("voltlake"));
        cmd.current_dir(&self.root);
        cmd
    }
}

#[test]
fn test_query_executes_against_scratch_database() -> Result<()> {
    let project = ScratchProject::new()?;
    let db = project.root.join("scratch.duckdb");
    let db = db.to_string_lossy();

    project
        .voltlake()
        .args(["query", "CREATE TABLE t (id INTEGER)", "--db-path", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ OK"));

    project
        .voltlake()
        .args(["query", "INSERT INTO t VALUES (1)", "--db-path", &db])
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_query_fails_on_invalid_sql() -> Result<()> {
    let project = ScratchProject::new()?;
    let db = project.root.join("scratch.duckdb");
    let db = db.to_string_lossy();

    project
        .voltlake()
        .args(["query", "SELECT * FROM no_such_table", "--db-path", &db])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query failed"));

    Ok(())
}

#[test]
fn test_plan_compiles_every_unit_without_a_database() -> Result<()> {
    let project = ScratchProject::new()?.with_config()?;

    project
        .voltlake()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compiled 17 units"));

    let compiled = project.root.join("target/compiled");
    let staging_connectors =
        std::fs::read_to_string(compiled.join("staging/staging_connectors.sql"))?;
    assert!(staging_connectors.contains("ev_charging.staging_connectors"));
    assert!(
        !staging_connectors.contains("{{"),
        "plan output must be fully rendered"
    );

    let connector = std::fs::read_to_string(compiled.join("main/connector.sql"))?;
    assert!(connector.contains("-- quality test: power_limits_connectors"));
    Ok(())
}

#[test]
fn test_run_without_config_fails_cleanly() -> Result<()> {
    let project = ScratchProject::new()?;

    project
        .voltlake()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to load warehouse configuration",
        ));

    Ok(())
}
