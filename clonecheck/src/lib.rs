//! Verification of user-written deep-copy functions.
//!
//! A record type describes its fields through [`Record`]; the [`Verifier`]
//! fills two instances with generated data, copies one of them with the
//! function under test and mutates the copy field by field. Any mutation that
//! leaks into the original is reported as a [`VerifyError`] naming the field.
//!
//! - **[`core`]**: Pure logic (field access, value generation, mutation).
//!   No I/O, fully testable in isolation.
//! - **[`verifier`]**: The verification state machine built on top of `core`.
//! - **[`config`]**: Tuning of the built-in handlers, loadable from TOML.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod verifier;

pub use crate::config::VerifierConfig;
pub use crate::core::field::{Field, FieldDescriptor, FieldValue, Record, Visibility, struct_fields};
pub use crate::core::generators::{Generator, GeneratorFactory};
pub use crate::core::mutators::Mutator;
pub use crate::error::{FillError, VerifyError};
pub use crate::verifier::Verifier;
