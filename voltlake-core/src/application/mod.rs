// voltlake-core/src/application/mod.rs

pub mod engine;
pub mod introspection;
pub mod pipeline;
pub mod ports;
pub mod quality;

// --- RE-EXPORTS (FACADE PATTERN) ---
// This allows the CLI to do:
// `use voltlake_core::application::{run_catalog, run_quality_tests};`
// without knowing the internal file structure.

pub use engine::execute_query;
pub use introspection::list_existing_constraints;
pub use pipeline::{run_catalog, RunResult, UnitState};
pub use quality::run_quality_tests;
