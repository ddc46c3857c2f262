//! Deterministic, pure logic shared by the verifier.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! records and return deterministic outputs suitable for tests.

pub mod defaults;
pub mod field;
pub mod generators;
pub mod mutators;
