//! End-to-end tests for the SMT log converter.
//!
//! The tests live under `tests/` and drive `smt-log-convert` against a
//! temporary directory through the real file source and sink.
