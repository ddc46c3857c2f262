//! Test-only records with correct and deliberately broken copy functions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::core::field::{Field, FieldValue};
use crate::impl_record;

/// Record with owned fields only; the derived `Clone` is a correct deep copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub int64_param: i64,
    pub int_list: Vec<i32>,
    pub int64_list: Vec<i64>,
    pub string_list: Vec<String>,
    pub map_vals: HashMap<String, Value>,
}

impl_record!(Config {
    int64_param,
    int_list,
    int64_list,
    string_list,
    map_vals,
});

/// Record mixing owned and shared fields plus two internal fields.
///
/// The derived `Clone` shares every `Rc` with the original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedConfig {
    pub count: i32,
    pub name: String,
    pub int_list: Rc<RefCell<Vec<i32>>>,
    pub int64_list: Rc<RefCell<Vec<i64>>>,
    pub string_list: Rc<RefCell<Vec<String>>>,
    pub map_vals: Rc<RefCell<HashMap<String, Value>>>,
    pub hidden: bool,
    pub _scratch: Option<Vec<u8>>,
}

impl_record!(
    SharedConfig {
        count,
        name,
        int_list,
        int64_list,
        string_list,
        map_vals,
    }
    internal { hidden, _scratch }
);

fn deep<T: Clone>(shared: &Rc<RefCell<T>>) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(shared.borrow().clone()))
}

impl SharedConfig {
    /// Correct copy: every shared field gets its own storage.
    pub fn deep_clone(&self) -> Self {
        Self {
            int_list: deep(&self.int_list),
            int64_list: deep(&self.int64_list),
            string_list: deep(&self.string_list),
            map_vals: deep(&self.map_vals),
            ..self.clone()
        }
    }

    /// Copy that forgets to reallocate `map_vals`.
    pub fn clone_sharing_map(&self) -> Self {
        Self {
            map_vals: Rc::clone(&self.map_vals),
            ..self.deep_clone()
        }
    }

    /// Copy that allocates `string_list` without copying its items.
    pub fn clone_dropping_strings(&self) -> Self {
        let capacity = self.string_list.borrow().len();
        Self {
            string_list: Rc::new(RefCell::new(Vec::with_capacity(capacity))),
            ..self.deep_clone()
        }
    }
}

/// Single shared integer sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntList {
    pub s: Rc<RefCell<Vec<i32>>>,
}

impl_record!(IntList { s });

/// Single field of a category no built-in handler supports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flag {
    pub b: bool,
}

impl_record!(Flag { b });

/// Owned byte buffer: needs a user-supplied generator and mutator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bytes {
    pub label: String,
    pub data: Rc<RefCell<Vec<u8>>>,
}

impl_record!(Bytes { label, data });

/// Generator for `Vec<u8>` and `Rc<RefCell<Vec<u8>>>`, one byte longer per call.
pub fn byte_generator() -> impl FnMut(&Field<'_>) -> Option<FieldValue> {
    let mut calls: u8 = 0;
    move |field: &Field<'_>| {
        crate::core::generators::claim(field, || {
            calls = calls.wrapping_add(1);
            (0..calls).collect::<Vec<u8>>()
        })
    }
}

/// Mutator for `Vec<u8>`: flips every bit of the last byte.
pub fn byte_mutator(field: &mut Field<'_>) -> bool {
    crate::core::mutators::edit_in_place::<Vec<u8>>(field, |bytes| {
        if let Some(last) = bytes.last_mut() {
            *last = !*last;
        }
    })
}
