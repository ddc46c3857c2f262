//! Verification of a record's copy function.
//!
//! A run moves through the stages
//! `fill original -> fill reference -> (per field: clone -> change -> check)`
//! and stops at the first failed check with a [`VerifyError`] describing it.

use std::any::type_name;

use anyhow::Result;
use tracing::{debug, debug_span, trace};

use crate::config::VerifierConfig;
use crate::core::defaults::Defaults;
use crate::core::field::{Record, struct_fields};
use crate::core::generators::{Generator, GeneratorFactory};
use crate::core::mutators::Mutator;
use crate::error::{FillError, VerifyError};

/// Checks that a copy function shares no mutable state between a record and
/// its copy.
///
/// `creator` must return a fresh, empty record on every call; `cloner` is the
/// copy function under test. User handlers are tried before the built-in ones,
/// in registration order.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use clonecheck::{Verifier, VerifyError, impl_record};
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Playlist {
///     tracks: Rc<RefCell<Vec<String>>>,
/// }
///
/// impl_record!(Playlist { tracks });
///
/// // `Clone` shares the tracks between both playlists.
/// let err = Verifier::new(Playlist::default, Playlist::clone)
///     .verify()
///     .expect_err("shallow copy");
/// assert!(matches!(err, VerifyError::OrigChanged { .. }));
///
/// Verifier::new(Playlist::default, |p: &Playlist| Playlist {
///     tracks: Rc::new(RefCell::new(p.tracks.borrow().clone())),
/// })
/// .verify()
/// .expect("deep copy");
/// ```
pub struct Verifier<R: Record> {
    creator: Box<dyn Fn() -> R>,
    cloner: Box<dyn Fn(&R) -> R>,
    generators: Vec<Box<dyn GeneratorFactory>>,
    mutators: Vec<Box<dyn Mutator>>,
    defaults: Defaults,
}

impl<R: Record> Verifier<R> {
    pub fn new(creator: impl Fn() -> R + 'static, cloner: impl Fn(&R) -> R + 'static) -> Self {
        Self {
            creator: Box::new(creator),
            cloner: Box::new(cloner),
            generators: Vec::new(),
            mutators: Vec::new(),
            defaults: Defaults::default(),
        }
    }

    /// Replace the built-in handlers with ones tuned by `config`.
    pub fn with_config(mut self, config: VerifierConfig) -> Result<Self> {
        config.validate()?;
        self.defaults = Defaults::new(config);
        Ok(self)
    }

    pub fn add_generator(mut self, factory: impl GeneratorFactory + 'static) -> Self {
        self.generators.push(Box::new(factory));
        self
    }

    pub fn add_generators(
        mut self,
        factories: impl IntoIterator<Item = Box<dyn GeneratorFactory>>,
    ) -> Self {
        self.generators.extend(factories);
        self
    }

    pub fn add_mutator(mut self, mutator: impl Mutator + 'static) -> Self {
        self.mutators.push(Box::new(mutator));
        self
    }

    pub fn add_mutators(mut self, mutators: impl IntoIterator<Item = Box<dyn Mutator>>) -> Self {
        self.mutators.extend(mutators);
        self
    }

    pub fn config(&self) -> &VerifierConfig {
        self.defaults.config()
    }

    /// Run the verification.
    ///
    /// Returns `Ok(())` if every exported field survived a change on the copy
    /// without affecting the original.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let _span = debug_span!("verify", record = type_name::<R>()).entered();

        let orig = self.auto_fill().map_err(VerifyError::OrigFill)?;
        let reference = self.auto_fill().map_err(VerifyError::RefFill)?;
        if orig != reference {
            return Err(VerifyError::RefOrigEqual {
                orig: format!("{orig:?}"),
                reference: format!("{reference:?}"),
            });
        }
        debug!("original and reference filled");

        for field in struct_fields(&(self.creator)()) {
            let mut clone = (self.cloner)(&orig);
            if clone != orig {
                return Err(VerifyError::CloneOrigNotEqual {
                    orig: format!("{orig:?}"),
                    clone: format!("{clone:?}"),
                });
            }

            self.auto_change(&mut clone, field)?;

            if orig != reference {
                return Err(VerifyError::OrigChanged {
                    field: field.to_string(),
                    orig: format!("{orig:?}"),
                    reference: format!("{reference:?}"),
                    clone: format!("{clone:?}"),
                });
            }
            if orig == clone {
                return Err(VerifyError::CloneOrigEqual {
                    field: field.to_string(),
                    clone: format!("{clone:?}"),
                });
            }
            trace!(field, "field verified");
        }

        debug!("verification passed");
        Ok(())
    }

    /// Create a record and fill every exported field with a generated value.
    ///
    /// Each call uses a freshly created generator chain, so two calls return
    /// equal records.
    pub fn auto_fill(&self) -> Result<R, FillError> {
        let mut record = (self.creator)();
        let mut chain: Vec<Box<dyn Generator>> = self
            .generators
            .iter()
            .map(|factory| factory.create())
            .collect();
        chain.push(self.defaults.generator());

        for descriptor in record.descriptor() {
            if !descriptor.is_exported() {
                continue;
            }
            let name = descriptor.name;
            let mut field = record
                .field_mut(name)
                .ok_or(FillError::Inaccessible { field: name })?;

            let value = chain
                .iter_mut()
                .find_map(|generator| generator.generate(&field))
                .ok_or_else(|| FillError::Unsupported {
                    field: name,
                    type_name: field.type_name(),
                })?;

            let produced = value.type_name();
            field.set(value).map_err(|_| FillError::TypeMismatch {
                field: name,
                expected: field.type_name(),
                produced,
            })?;
            trace!(field = name, "field filled");
        }

        Ok(record)
    }

    /// Change the field `name` of `record` with the first mutator that claims
    /// its type.
    pub fn auto_change(&self, record: &mut R, name: &str) -> Result<(), VerifyError> {
        let Some(mut field) = record.field_mut(name) else {
            return Err(VerifyError::FieldNotFound {
                field: name.to_string(),
                record: format!("{record:?}"),
            });
        };

        let changed = self
            .mutators
            .iter()
            .chain(self.defaults.mutators())
            .any(|mutator| mutator.mutate(&mut field));
        if !changed {
            return Err(VerifyError::Change {
                field: name.to_string(),
                type_name: field.type_name(),
            });
        }
        trace!(field = name, "field changed");
        Ok(())
    }
}

impl<R: Record> std::fmt::Debug for Verifier<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("record", &type_name::<R>())
            .field("generators", &self.generators.len())
            .field("mutators", &self.mutators.len())
            .field("defaults", &self.defaults)
            .finish()
    }
}
