// voltlake/src/commands/mod.rs

pub mod plan;
pub mod query;
pub mod run;
