// voltlake-core/src/domain/catalog/mod.rs
//
// Declarative registry of warehouse tables. Each table owns its full
// lifecycle (drop, create, populate, constraint drop, quality tests) as
// structured records; the orchestrator consumes them in catalog order.

mod staging;
mod warehouse;

/// Aggregation policy for a quality test over the returned boolean column.
///
/// `All` is evaluated across every returned row's first column; there is no
/// single-row special case. `Any` passes as soon as one row is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    All,
    Any,
}

/// One declarative data-correctness assertion, run after a table is populated.
#[derive(Debug, Clone)]
pub struct QualityTest {
    pub name: String,
    pub sql_template: String,
    pub aggregation: Aggregation,
}

impl QualityTest {
    pub fn all(name: impl Into<String>, sql_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_template: sql_template.into(),
            aggregation: Aggregation::All,
        }
    }

    pub fn any(name: impl Into<String>, sql_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_template: sql_template.into(),
            aggregation: Aggregation::Any,
        }
    }
}

/// A named constraint plus the statement removing it.
///
/// The name is a structured field rather than being parsed back out of the
/// statement text: the orchestrator checks it against the introspected
/// catalog before executing the drop, which keeps reruns safe on a fresh
/// schema where the constraint does not exist yet.
#[derive(Debug, Clone)]
pub struct ConstraintDrop {
    pub name: String,
    pub statement: String,
}

/// One logical warehouse table's full ingestion lifecycle.
#[derive(Debug, Clone)]
pub struct TableUnit {
    pub name: String,
    pub drop_statement: Option<String>,
    pub create_statement: String,
    pub populate_statement: String,
    pub drop_constraint: Option<ConstraintDrop>,
    pub quality_tests: Vec<QualityTest>,
}

impl TableUnit {
    pub fn new(
        name: impl Into<String>,
        create_statement: impl Into<String>,
        populate_statement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            drop_statement: None,
            create_statement: create_statement.into(),
            populate_statement: populate_statement.into(),
            drop_constraint: None,
            quality_tests: Vec::new(),
        }
    }

    pub fn with_drop(mut self, statement: impl Into<String>) -> Self {
        self.drop_statement = Some(statement.into());
        self
    }

    pub fn with_constraint_drop(
        mut self,
        name: impl Into<String>,
        statement: impl Into<String>,
    ) -> Self {
        self.drop_constraint = Some(ConstraintDrop {
            name: name.into(),
            statement: statement.into(),
        });
        self
    }

    pub fn with_test(mut self, test: QualityTest) -> Self {
        self.quality_tests.push(test);
        self
    }
}

/// Shared row-count assertion: the cheapest possible "did anything land" gate.
pub const TEMPLATE_TEST_ROW_COUNT: &str =
    "select count(*) > 0 from {{ SCHEMA }}.{{ TABLE_NAME }}";

/// The fixed, ordered table catalog, split into the two pipeline phases.
///
/// Staging units land raw flat files; main units derive typed, constrained
/// tables from them via insert-as-select. Phase ordering is the dependency
/// mechanism: every main unit may assume all staging units are populated.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub staging: Vec<TableUnit>,
    pub main: Vec<TableUnit>,
}

impl Catalog {
    /// The standard EV charging warehouse catalog.
    pub fn standard() -> Self {
        Self {
            staging: staging::units(),
            main: warehouse::units(),
        }
    }

    /// All units in execution order (staging first).
    pub fn units(&self) -> impl Iterator<Item = &TableUnit> {
        self.staging.iter().chain(self.main.iter())
    }

    pub fn len(&self) -> usize {
        self.staging.len() + self.main.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staging.is_empty() && self.main.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_phases() {
        let catalog = Catalog::standard();

        assert_eq!(catalog.staging.len(), 9);
        assert_eq!(catalog.main.len(), 8);
        assert_eq!(catalog.len(), 17);

        // Staging lands first, untouched by constraints.
        for unit in &catalog.staging {
            assert!(unit.name.starts_with("staging_"), "unit: {}", unit.name);
            assert!(unit.drop_constraint.is_none(), "unit: {}", unit.name);
        }

        // Every primary-keyed main unit carries a guarded constraint drop.
        let keyed: Vec<_> = catalog
            .main
            .iter()
            .filter(|u| u.drop_constraint.is_some())
            .collect();
        assert!(!keyed.is_empty());
        for unit in keyed {
            let constraint = unit.drop_constraint.as_ref().unwrap();
            assert!(constraint.name.ends_with("_pkey"), "unit: {}", unit.name);
            assert!(
                unit.create_statement.contains(&constraint.name),
                "create statement of '{}' must define '{}'",
                unit.name,
                constraint.name
            );
        }
    }

    #[test]
    fn test_constraint_carrying_units_never_drop_their_table() {
        // Rerun safety for main tables is create-if-not-exists plus the
        // guarded pkey drop. A unit that also dropped its own table would
        // execute the constraint drop against a table that no longer exists.
        let catalog = Catalog::standard();
        for unit in catalog.units() {
            assert!(
                !(unit.drop_statement.is_some() && unit.drop_constraint.is_some()),
                "unit '{}' both drops its table and drops a constraint",
                unit.name
            );
        }
        for unit in &catalog.main {
            assert!(unit.drop_statement.is_none(), "unit: {}", unit.name);
        }
    }

    #[test]
    fn test_unit_names_are_unique() {
        let catalog = Catalog::standard();
        let mut names: Vec<_> = catalog.units().map(|u| u.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_main_units_select_from_schema_qualified_staging() {
        let catalog = Catalog::standard();
        for unit in &catalog.main {
            assert!(
                unit.populate_statement.contains("{{ SCHEMA }}.staging_"),
                "main unit '{}' must populate from a staging table",
                unit.name
            );
        }
    }

    #[test]
    fn test_connector_unit_has_power_bounds_test() {
        let catalog = Catalog::standard();
        let connector = catalog
            .main
            .iter()
            .find(|u| u.name == "connector")
            .unwrap();
        let power = connector
            .quality_tests
            .iter()
            .find(|t| t.name == "power_limits_connectors")
            .unwrap();
        assert_eq!(power.aggregation, Aggregation::All);
        assert!(power.sql_template.contains("between 2 and 400"));
    }
}
