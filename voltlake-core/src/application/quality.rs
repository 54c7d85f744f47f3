// voltlake-core/src/application/quality.rs
//
// The data quality gate: declarative boolean assertions run against a
// freshly populated table. First failing test aborts the unit.

use crate::application::ports::TemplateEngine;
use crate::domain::catalog::{Aggregation, QualityTest};
use crate::domain::error::DomainError;
use crate::domain::placeholder::PlaceholderMap;
use crate::error::VoltlakeError;
use crate::ports::connector::Connector;

pub async fn run_quality_tests<T: TemplateEngine>(
    connector: &dyn Connector,
    engine: &T,
    tests: &[QualityTest],
    table_name: &str,
    vars: &PlaceholderMap,
) -> Result<(), VoltlakeError> {
    if tests.is_empty() {
        return Ok(());
    }

    println!("    🧪 Running {} data tests for {}", tests.len(), table_name);

    for test in tests {
        let scoped = vars.with_table(table_name);
        let sql = engine.render(&test.sql_template, &scoped)?;

        let values = connector.fetch_bool_column(&sql).await?;

        // Zero rows is its own failure mode, distinct from a false assertion:
        // a test that matched nothing proves nothing.
        if values.is_empty() {
            tracing::error!(test = %test.name, sql = %sql, "no result returned");
            return Err(DomainError::QualityNoResult {
                test: test.name.clone(),
            }
            .into());
        }

        let passed = match test.aggregation {
            Aggregation::All => values.iter().all(|v| *v),
            Aggregation::Any => values.iter().any(|v| *v),
        };

        if !passed {
            tracing::error!(test = %test.name, sql = %sql, "data test failed");
            return Err(DomainError::QualityAssertionFailed {
                test: test.name.clone(),
                sql,
            }
            .into());
        }

        println!("      ✅ PASS: {} on {}", test.name, table_name);
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::placeholder::keys;
    use crate::infrastructure::compiler::renderer::SqlRenderer;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // --- MOCK CONNECTOR ---
    // Replays a scripted boolean column for every query it receives.
    #[derive(Clone)]
    struct MockConnector {
        pub executed_queries: Arc<Mutex<Vec<String>>>,
        pub bools_return: Vec<bool>,
    }

    impl MockConnector {
        fn with_bools(bools: Vec<bool>) -> Self {
            Self {
                executed_queries: Arc::new(Mutex::new(Vec::new())),
                bools_return: bools,
            }
        }
    }

    #[async_trait]
    impl Connector for MockConnector {
        async fn execute(&self, statement: &str) -> Result<(), VoltlakeError> {
            self.executed_queries
                .lock()
                .unwrap()
                .push(statement.to_string());
            Ok(())
        }
        async fn fetch_bool_column(&self, query: &str) -> Result<Vec<bool>, VoltlakeError> {
            self.executed_queries
                .lock()
                .unwrap()
                .push(query.to_string());
            Ok(self.bools_return.clone())
        }
        async fn fetch_text_column(&self, _query: &str) -> Result<Vec<String>, VoltlakeError> {
            Ok(vec![])
        }
        async fn commit(&self) -> Result<(), VoltlakeError> {
            Ok(())
        }
    }

    fn test_vars() -> PlaceholderMap {
        PlaceholderMap::new().set(keys::SCHEMA, "public")
    }

    fn bounds_test(aggregation: Aggregation) -> QualityTest {
        QualityTest {
            name: "power_limits".into(),
            sql_template: "select max_power between 2 and 400 from {{ SCHEMA }}.{{ TABLE_NAME }}"
                .into(),
            aggregation,
        }
    }

    #[tokio::test]
    async fn test_all_fails_on_single_false_row() {
        let connector = MockConnector::with_bools(vec![true, true, false]);
        let renderer = SqlRenderer::new();
        let tests = vec![bounds_test(Aggregation::All)];

        let result =
            run_quality_tests(&connector, &renderer, &tests, "connector", &test_vars()).await;

        match result {
            Err(VoltlakeError::Domain(DomainError::QualityAssertionFailed { test, sql })) => {
                assert_eq!(test, "power_limits");
                assert!(sql.contains("public.connector"));
            }
            other => panic!("expected QualityAssertionFailed, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_any_passes_on_single_true_row() {
        let connector = MockConnector::with_bools(vec![true, true, false]);
        let renderer = SqlRenderer::new();
        let tests = vec![bounds_test(Aggregation::Any)];

        let result =
            run_quality_tests(&connector, &renderer, &tests, "connector", &test_vars()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_zero_rows_is_a_distinct_failure() {
        let connector = MockConnector::with_bools(vec![]);
        let renderer = SqlRenderer::new();
        let tests = vec![bounds_test(Aggregation::All)];

        let result =
            run_quality_tests(&connector, &renderer, &tests, "connector", &test_vars()).await;

        match result {
            Err(VoltlakeError::Domain(DomainError::QualityNoResult { test })) => {
                assert_eq!(test, "power_limits");
            }
            other => panic!("expected QualityNoResult, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_table_name_injected_into_rendered_sql() {
        let connector = MockConnector::with_bools(vec![true]);
        let renderer = SqlRenderer::new();
        let tests = vec![QualityTest::all(
            "row_count",
            crate::domain::catalog::TEMPLATE_TEST_ROW_COUNT,
        )];

        run_quality_tests(&connector, &renderer, &tests, "charging_point", &test_vars())
            .await
            .unwrap();

        let queries = connector.executed_queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0],
            "select count(*) > 0 from public.charging_point"
        );
    }

    #[tokio::test]
    async fn test_fail_fast_stops_at_first_failing_test() {
        let connector = MockConnector::with_bools(vec![false]);
        let renderer = SqlRenderer::new();
        let tests = vec![
            bounds_test(Aggregation::All),
            QualityTest::all("never_reached", "select true from {{ SCHEMA }}.{{ TABLE_NAME }}"),
        ];

        let result =
            run_quality_tests(&connector, &renderer, &tests, "connector", &test_vars()).await;
        assert!(result.is_err());

        let queries = connector.executed_queries.lock().unwrap();
        assert_eq!(queries.len(), 1, "second test must never execute");
    }

    #[tokio::test]
    async fn test_empty_test_list_is_a_no_op() {
        let connector = MockConnector::with_bools(vec![false]);
        let renderer = SqlRenderer::new();

        let result = run_quality_tests(&connector, &renderer, &[], "connector", &test_vars()).await;
        assert!(result.is_ok());
        assert!(connector.executed_queries.lock().unwrap().is_empty());
    }
}
