// voltlake-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Defines the contracts (Connector...)
pub mod ports;

// 2. Domain (Business core)
// Table catalog, quality tests, placeholder mappings.
// Depends on NOTHING else (neither infra nor app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Technical implementation (DuckDB, config files, SQL rendering)
// Depends on the Domain and the Ports.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration (Pipeline, Quality Gate, Introspection)
// Depends on the Domain, the Infra and the Ports.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// Allows importing the main error easily: use voltlake_core::VoltlakeError;
pub use error::VoltlakeError;
