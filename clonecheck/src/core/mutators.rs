//! In-place field mutators applied to clones during verification.
//!
//! A mutator either edits the field it is handed and reports success, or
//! declines so the next mutator in the chain is tried. Edits on shared
//! `Rc<RefCell<_>>` fields go to the shared storage itself, which is what makes
//! a shallow copy visible on the original.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::core::field::Field;

/// Destructively edits fields of the categories it supports.
pub trait Mutator {
    /// Edit `field` in place and return `true`, or return `false` to decline.
    fn mutate(&self, field: &mut Field<'_>) -> bool;
}

impl<F> Mutator for F
where
    F: Fn(&mut Field<'_>) -> bool,
{
    fn mutate(&self, field: &mut Field<'_>) -> bool {
        self(field)
    }
}

/// Apply `edit` to `field` if it is declared as `T` or as `Rc<RefCell<T>>`.
pub fn edit_in_place<T: 'static>(field: &mut Field<'_>, edit: impl FnOnce(&mut T)) -> bool {
    if let Some(value) = field.get_mut::<T>() {
        edit(value);
        return true;
    }
    if let Some(shared) = field.get_mut::<Rc<RefCell<T>>>() {
        edit(&mut *shared.borrow_mut());
        return true;
    }
    false
}

/// Build the built-in mutator chain, multiplying numbers by `factor`.
///
/// Sequences only have their last element edited; an empty container is
/// claimed but left as is.
pub fn builtin_mutators(factor: i32) -> Vec<Box<dyn Mutator>> {
    let wide = i64::from(factor);
    vec![
        Box::new(move |field: &mut Field<'_>| {
            edit_in_place::<i32>(field, |value| *value = value.wrapping_mul(factor))
        }),
        Box::new(move |field: &mut Field<'_>| {
            edit_in_place::<i64>(field, |value| *value = value.wrapping_mul(wide))
        }),
        Box::new(move |field: &mut Field<'_>| {
            edit_in_place::<Vec<i32>>(field, |values| {
                if let Some(last) = values.last_mut() {
                    *last = last.wrapping_mul(factor);
                }
            })
        }),
        Box::new(move |field: &mut Field<'_>| {
            edit_in_place::<Vec<i64>>(field, |values| {
                if let Some(last) = values.last_mut() {
                    *last = last.wrapping_mul(wide);
                }
            })
        }),
        Box::new(|field: &mut Field<'_>| edit_in_place::<String>(field, double_string)),
        Box::new(|field: &mut Field<'_>| {
            edit_in_place::<Vec<String>>(field, |values| {
                if let Some(last) = values.last_mut() {
                    double_string(last);
                }
            })
        }),
        Box::new(move |field: &mut Field<'_>| scale_map_entry(field, wide)),
    ]
}

fn double_string(value: &mut String) {
    *value = value.repeat(2);
}

/// Multiply one entry of a `HashMap<String, Value>`. Declines maps whose
/// chosen entry is not an integer.
fn scale_map_entry(field: &mut Field<'_>, factor: i64) -> bool {
    let scale = |map: &mut HashMap<String, Value>| -> bool {
        let Some(entry) = map.values_mut().next() else {
            return true;
        };
        match entry.as_i64() {
            Some(number) => {
                *entry = Value::from(number.wrapping_mul(factor));
                true
            }
            None => false,
        }
    };

    if let Some(map) = field.get_mut::<HashMap<String, Value>>() {
        return scale(map);
    }
    if let Some(shared) = field.get_mut::<Rc<RefCell<HashMap<String, Value>>>>() {
        return scale(&mut *shared.borrow_mut());
    }
    false
}
