// voltlake-core/src/infrastructure/config/mod.rs
//
// Warehouse configuration: schema name, storage-access role, and one
// object-storage URI per staging source. The engine itself only ever sees
// the flattened PlaceholderMap; parsing stops here.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::placeholder::{keys, PlaceholderMap};
use crate::infrastructure::error::InfrastructureError;

fn default_region() -> String {
    "us-east-2".to_string()
}

fn default_database() -> String {
    "voltlake.duckdb".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceUris {
    pub status_charging_points: String,
    pub status_connectors: String,
    pub master_charging_stations: String,
    pub master_charging_points: String,
    pub master_connectors: String,
    pub poi_points: String,
    pub poi_polygons: String,
    pub poi_multipolygons: String,
    pub poi_station_mapping: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Target warehouse schema all tables live in.
    pub schema: String,
    /// Storage-access role used by the COPY statements.
    pub iam_role: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Local database file for the bundled engine.
    #[serde(default = "default_database")]
    pub database: String,
    pub sources: SourceUris,
}

impl WarehouseConfig {
    /// Flatten the configuration into the mapping the catalog templates
    /// expect. `TABLE_NAME` is deliberately absent; the quality gate injects
    /// it per test.
    pub fn placeholders(&self) -> PlaceholderMap {
        PlaceholderMap::new()
            .set(keys::SCHEMA, &self.schema)
            .set(keys::ROLE_ARN, &self.iam_role)
            .set(keys::REGION, &self.region)
            .set(
                keys::STATUS_DATA_CHARGING_POINT,
                &self.sources.status_charging_points,
            )
            .set(
                keys::STATUS_DATA_CHARGING_CONNECTORS,
                &self.sources.status_connectors,
            )
            .set(
                keys::MASTER_DATA_CHARGING_STATIONS,
                &self.sources.master_charging_stations,
            )
            .set(
                keys::MASTER_DATA_CHARGING_POINTS,
                &self.sources.master_charging_points,
            )
            .set(keys::MASTER_DATA_CONNECTORS, &self.sources.master_connectors)
            .set(keys::POI_DATA_POINTS, &self.sources.poi_points)
            .set(keys::POI_DATA_POLYGONS, &self.sources.poi_polygons)
            .set(
                keys::POI_DATA_MULTIPOLYGONS,
                &self.sources.poi_multipolygons,
            )
            .set(keys::POI_STATION_MAPPING, &self.sources.poi_station_mapping)
    }
}

#[instrument(skip(project_dir))]
pub fn load_warehouse_config(project_dir: &Path) -> Result<WarehouseConfig, InfrastructureError> {
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading warehouse configuration");

    let content = fs::read_to_string(&config_path)?;
    let mut config: WarehouseConfig = serde_yaml::from_str(&content)?;

    apply_env_overrides(&mut config);

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    let candidates = ["voltlake.yaml", "warehouse.yaml"];
    for filename in candidates {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, candidates
    )))
}

fn apply_env_overrides(config: &mut WarehouseConfig) {
    // Allows: VOLTLAKE_SCHEMA=ev_staging voltlake run
    if let Ok(val) = std::env::var("VOLTLAKE_SCHEMA") {
        info!(old = ?config.schema, new = ?val, "Overriding schema via ENV");
        config.schema = val;
    }
    if let Ok(val) = std::env::var("VOLTLAKE_DATABASE") {
        info!(old = ?config.database, new = ?val, "Overriding database via ENV");
        config.database = val;
    }
}
