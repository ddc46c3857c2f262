//! Built-in handler set merged behind user-supplied handlers.

use crate::config::VerifierConfig;
use crate::core::generators::{BuiltinGenerator, Generator};
use crate::core::mutators::{Mutator, builtin_mutators};

/// Built-in generators and mutators for one verifier.
///
/// Constructed once from a [`VerifierConfig`]; every fill asks it for a fresh
/// generator so that counters restart from the same state.
pub struct Defaults {
    config: VerifierConfig,
    mutators: Vec<Box<dyn Mutator>>,
}

impl Defaults {
    pub fn new(config: VerifierConfig) -> Self {
        let mutators = builtin_mutators(config.mutation_factor);
        Self { config, mutators }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn generator(&self) -> Box<dyn Generator> {
        Box::new(BuiltinGenerator::new(&self.config))
    }

    pub fn mutators(&self) -> &[Box<dyn Mutator>] {
        &self.mutators
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::new(VerifierConfig::default())
    }
}

impl std::fmt::Debug for Defaults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Defaults")
            .field("config", &self.config)
            .field("mutators", &self.mutators.len())
            .finish()
    }
}
