// voltlake-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoltlakeError {
    // --- DOMAIN ERRORS (Quality gates, catalog) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (Database, IO, Templates) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- RUN-LEVEL ERRORS ---
    #[error("Constraint introspection failed: {0}")]
    ConstraintLookup(String),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for VoltlakeError {
    fn from(err: std::io::Error) -> Self {
        VoltlakeError::Infrastructure(InfrastructureError::Io(err))
    }
}
