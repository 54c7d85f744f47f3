// voltlake-core/src/domain/placeholder.rs

use std::collections::BTreeMap;

/// Well-known placeholder names used by the standard catalog.
/// The operator-supplied mapping must cover all of them except
/// `TABLE_NAME`, which the quality gate injects per test.
pub mod keys {
    pub const SCHEMA: &str = "SCHEMA";
    pub const TABLE_NAME: &str = "TABLE_NAME";
    pub const ROLE_ARN: &str = "ROLE_ARN";
    pub const REGION: &str = "REGION";

    pub const STATUS_DATA_CHARGING_POINT: &str = "STATUS_DATA_CHARGING_POINT";
    pub const STATUS_DATA_CHARGING_CONNECTORS: &str = "STATUS_DATA_CHARGING_CONNECTORS";
    pub const MASTER_DATA_CHARGING_STATIONS: &str = "MASTER_DATA_CHARGING_STATIONS";
    pub const MASTER_DATA_CHARGING_POINTS: &str = "MASTER_DATA_CHARGING_POINTS";
    pub const MASTER_DATA_CONNECTORS: &str = "MASTER_DATA_CONNECTORS";
    pub const POI_DATA_POINTS: &str = "POI_DATA_POINTS";
    pub const POI_DATA_POLYGONS: &str = "POI_DATA_POLYGONS";
    pub const POI_DATA_MULTIPOLYGONS: &str = "POI_DATA_MULTIPOLYGONS";
    pub const POI_STATION_MAPPING: &str = "POI_STATION_MAPPING";

    /// Everything the standard catalog expects from configuration,
    /// i.e. all keys except the per-test `TABLE_NAME`.
    pub const REQUIRED: &[&str] = &[
        SCHEMA,
        ROLE_ARN,
        REGION,
        STATUS_DATA_CHARGING_POINT,
        STATUS_DATA_CHARGING_CONNECTORS,
        MASTER_DATA_CHARGING_STATIONS,
        MASTER_DATA_CHARGING_POINTS,
        MASTER_DATA_CONNECTORS,
        POI_DATA_POINTS,
        POI_DATA_POLYGONS,
        POI_DATA_MULTIPOLYGONS,
        POI_STATION_MAPPING,
    ];
}

/// Flat mapping from template variable name to substitution value.
///
/// Operator-controlled configuration, not end-user input: values are spliced
/// verbatim into SQL text, there is deliberately no quoting layer here.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(transparent)]
pub struct PlaceholderMap(BTreeMap<String, String>);

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, used by configuration loading and tests.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// A copy of this mapping extended with the concrete table under test.
    pub fn with_table(&self, table_name: &str) -> Self {
        let mut scoped = self.clone();
        scoped.insert(keys::TABLE_NAME, table_name);
        scoped
    }

    /// Missing well-known keys, for an early configuration check.
    pub fn missing_required(&self) -> Vec<&'static str> {
        keys::REQUIRED
            .iter()
            .filter(|k| !self.0.contains_key(**k))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_table_does_not_mutate_original() {
        let vars = PlaceholderMap::new().set(keys::SCHEMA, "public");
        let scoped = vars.with_table("connector");

        assert_eq!(scoped.get(keys::TABLE_NAME), Some("connector"));
        assert_eq!(vars.get(keys::TABLE_NAME), None);
        assert_eq!(scoped.get(keys::SCHEMA), Some("public"));
    }

    #[test]
    fn test_missing_required_reports_gaps() {
        let vars = PlaceholderMap::new()
            .set(keys::SCHEMA, "public")
            .set(keys::ROLE_ARN, "arn:aws:iam::123:role/loader");

        let missing = vars.missing_required();
        assert!(!missing.contains(&keys::SCHEMA));
        assert!(missing.contains(&keys::MASTER_DATA_CONNECTORS));
    }
}
