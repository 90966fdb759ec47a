//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! accounting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Sample charts, codes, and dates
//! - `builders`: Builder patterns for test transactions and charts
//! - `memory`: In-memory chart and journal store
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `logging`: One-time tracing setup for tests

pub mod fixtures;
pub mod builders;
pub mod memory;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use memory::*;
pub use assertions::*;
pub use generators::*;
pub use logging::*;
