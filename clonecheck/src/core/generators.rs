//! Value generators used to fill records before verification.
//!
//! A generator inspects a field's declared type and either produces a value
//! for it or declines. Generators are stateful: every claimed call advances an
//! internal counter, so two fields of the same category never receive equal
//! values, while two fresh generators driven over the same fields produce the
//! same sequence.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::config::VerifierConfig;
use crate::core::field::{Field, FieldValue};

/// Produces values for the field categories it supports.
pub trait Generator {
    /// Return a fresh value for `field`, or `None` if its type is unsupported.
    fn generate(&mut self, field: &Field<'_>) -> Option<FieldValue>;
}

impl<F> Generator for F
where
    F: FnMut(&Field<'_>) -> Option<FieldValue>,
{
    fn generate(&mut self, field: &Field<'_>) -> Option<FieldValue> {
        self(field)
    }
}

/// Creates a fresh [`Generator`] for every fill.
pub trait GeneratorFactory {
    fn create(&self) -> Box<dyn Generator>;
}

impl<F, G> GeneratorFactory for F
where
    F: Fn() -> G,
    G: Generator + 'static,
{
    fn create(&self) -> Box<dyn Generator> {
        Box::new(self())
    }
}

/// Wrap `make()` into a value for `field` if it is declared as `T` or as a
/// shared `Rc<RefCell<T>>`. `make` only runs when the field is claimed.
pub fn claim<T: 'static>(field: &Field<'_>, make: impl FnOnce() -> T) -> Option<FieldValue> {
    if field.is::<T>() {
        return Some(FieldValue::new(make()));
    }
    if field.is::<Rc<RefCell<T>>>() {
        return Some(FieldValue::new(Rc::new(RefCell::new(make()))));
    }
    None
}

type Rule = fn(&mut Counters, &Field<'_>) -> Option<FieldValue>;

/// Per-run counters shared by the built-in rules.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Counters {
    seed: usize,
    int: i32,
    int64: i64,
    strings: usize,
}

impl Counters {
    fn next_int(&mut self) -> i32 {
        self.int = self.int.wrapping_add(1);
        self.int
    }

    fn next_int64(&mut self) -> i64 {
        self.int64 = self.int64.wrapping_add(1);
        self.int64
    }

    /// Advance the string counter, returning its previous value and the
    /// `"<c>_"` unit derived from it.
    fn next_strings(&mut self) -> (usize, String) {
        let count = self.strings;
        self.strings += 1;
        let letter = char::from(b'a' + (count % 26) as u8);
        (count, format!("{letter}_"))
    }
}

const RULES: &[Rule] = &[
    int_scalar,
    int64_scalar,
    int_sequence,
    int64_sequence,
    string_scalar,
    string_sequence,
    string_map,
];

fn int_scalar(counters: &mut Counters, field: &Field<'_>) -> Option<FieldValue> {
    claim(field, || counters.next_int())
}

fn int64_scalar(counters: &mut Counters, field: &Field<'_>) -> Option<FieldValue> {
    claim(field, || counters.next_int64())
}

/// `count * seed` items, or `seed` items once the product no longer fits.
fn sequence_len(count: usize, seed: usize) -> usize {
    count.checked_mul(seed).unwrap_or(seed)
}

fn int_sequence(counters: &mut Counters, field: &Field<'_>) -> Option<FieldValue> {
    claim(field, || {
        let base = counters.next_int();
        let len = sequence_len(base.unsigned_abs() as usize, counters.seed);
        (0..len)
            .map(|i| base.wrapping_add(i as i32))
            .collect::<Vec<i32>>()
    })
}

fn int64_sequence(counters: &mut Counters, field: &Field<'_>) -> Option<FieldValue> {
    claim(field, || {
        let base = counters.next_int64();
        let len = sequence_len(base.unsigned_abs() as usize, counters.seed);
        (0..len)
            .map(|i| base.wrapping_add(i as i64))
            .collect::<Vec<i64>>()
    })
}

fn string_scalar(counters: &mut Counters, field: &Field<'_>) -> Option<FieldValue> {
    claim(field, || {
        let (count, unit) = counters.next_strings();
        unit.repeat(count)
    })
}

fn string_sequence(counters: &mut Counters, field: &Field<'_>) -> Option<FieldValue> {
    claim(field, || {
        let (count, unit) = counters.next_strings();
        vec![unit.repeat(count); count]
    })
}

/// Map values are the integers `(i + 1) * 3 / 2`, keys grow one unit per entry.
fn string_map(counters: &mut Counters, field: &Field<'_>) -> Option<FieldValue> {
    claim(field, || {
        let (count, unit) = counters.next_strings();
        (0..count)
            .map(|i| (unit.repeat(count + i), Value::from((i as i64 + 1) * 3 / 2)))
            .collect::<HashMap<String, Value>>()
    })
}

/// The built-in generator chain.
///
/// Covers `i32`, `i64`, `String`, `Vec<i32>`, `Vec<i64>`, `Vec<String>` and
/// `HashMap<String, serde_json::Value>`, each also in its `Rc<RefCell<_>>`
/// form. Scalars and integer sequences share one counter per integer width;
/// strings, string sequences and maps share the string counter.
#[derive(Debug, Clone)]
pub struct BuiltinGenerator {
    counters: Counters,
}

impl BuiltinGenerator {
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            counters: Counters {
                seed: config.seed,
                int: 0,
                int64: 0,
                strings: config.seed,
            },
        }
    }
}

impl Generator for BuiltinGenerator {
    fn generate(&mut self, field: &Field<'_>) -> Option<FieldValue> {
        RULES.iter().find_map(|rule| rule(&mut self.counters, field))
    }
}
