//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`cluster`] - Scripted cluster clients and factory with an in-flight gauge.
//! - [`process`] - Scripted `kubectl` runner keyed by `--context`.
//! - [`supervision`] - Probe, consumer, status and side-refresh doubles.

pub mod cluster;
pub mod process;
pub mod supervision;
