// voltlake-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Data quality test '{test}' returned no result")]
    #[diagnostic(
        code(voltlake::domain::quality_no_result),
        help("A quality test query must return at least one boolean-valued row.")
    )]
    QualityNoResult { test: String },

    #[error("Data quality test '{test}' failed")]
    #[diagnostic(
        code(voltlake::domain::quality_failed),
        help("Run the rendered query by hand to inspect the offending rows.")
    )]
    QualityAssertionFailed { test: String, sql: String },

    #[error("Catalog Error: {0}")]
    #[diagnostic(code(voltlake::domain::catalog))]
    CatalogError(String),
}
