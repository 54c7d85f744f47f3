// voltlake-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::VoltlakeError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::Connector;

pub struct DuckDbConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, VoltlakeError> {
        self.conn.lock().map_err(|_| {
            VoltlakeError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }
}

fn db_err(e: duckdb::Error) -> VoltlakeError {
    VoltlakeError::Infrastructure(InfrastructureError::Database(DatabaseError::DuckDb(e)))
}

#[async_trait]
impl Connector for DuckDbConnector {
    async fn execute(&self, statement: &str) -> Result<(), VoltlakeError> {
        let conn = self.lock()?;
        conn.execute(statement, [])
            .map(|_rows| ())
            .map_err(db_err)
    }

    async fn fetch_bool_column(&self, query: &str) -> Result<Vec<bool>, VoltlakeError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query).map_err(db_err)?;

        let rows = stmt
            .query_map([], |row| row.get::<_, bool>(0))
            .map_err(db_err)?;

        let mut values = Vec::new();
        for row in rows {
            values.push(row.map_err(db_err)?);
        }
        Ok(values)
    }

    async fn fetch_text_column(&self, query: &str) -> Result<Vec<String>, VoltlakeError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query).map_err(db_err)?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(db_err)?;

        let mut values = Vec::new();
        for row in rows {
            values.push(row.map_err(db_err)?);
        }
        Ok(values)
    }

    async fn commit(&self) -> Result<(), VoltlakeError> {
        // DuckDB autocommits each statement; CHECKPOINT flushes the WAL so
        // the populated data is durable before the quality gate reads it.
        let conn = self.lock()?;
        conn.execute_batch("CHECKPOINT").map_err(db_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[tokio::test]
    async fn test_duckdb_execute_and_fetch_bools() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;

        connector
            .execute("CREATE TABLE readings (max_power INTEGER)")
            .await?;
        connector
            .execute("INSERT INTO readings VALUES (1), (50), (500)")
            .await?;

        let values = connector
            .fetch_bool_column("SELECT max_power BETWEEN 2 AND 400 FROM readings ORDER BY max_power")
            .await?;
        assert_eq!(values, vec![false, true, false]);
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_fetch_text_column() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;

        connector
            .execute("CREATE TABLE names (n VARCHAR)")
            .await?;
        connector
            .execute("INSERT INTO names VALUES ('connector_pkey'), ('poi_pkey')")
            .await?;

        let names = connector
            .fetch_text_column("SELECT n FROM names ORDER BY n")
            .await?;
        assert_eq!(names, vec!["connector_pkey", "poi_pkey"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_zero_rows_yields_empty_column() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;

        connector.execute("CREATE TABLE empty_t (b BOOLEAN)").await?;
        let values = connector.fetch_bool_column("SELECT b FROM empty_t").await?;
        assert!(values.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_error_on_invalid_sql() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;
        let result = connector.execute("SELECT * FROM non_existent_table").await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_commit_is_safe_to_call() -> Result<()> {
        let connector = DuckDbConnector::new(":memory:")?;
        connector.execute("CREATE TABLE t (id INTEGER)").await?;
        connector.commit().await?;
        Ok(())
    }
}
