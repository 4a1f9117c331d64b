//! SMT log converter: library crate behind the `smt-log-convert` binary.
//!
//! Exposes config loading, job planning and the batch runner so the
//! end-to-end tests can drive a run against a temporary directory.

pub mod batch;
pub mod config;
pub mod plan;
