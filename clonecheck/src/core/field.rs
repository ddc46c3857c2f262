//! Reflection surface a record exposes to the verifier.
//!
//! A [`Record`] lists its fields once, in declaration order, through a static
//! descriptor and hands out type-erased [`Field`] handles by name. Handlers
//! inspect the handle's declared type and read, write or edit the value behind
//! it without knowing the concrete record type.

use std::any::{Any, type_name};
use std::fmt::{self, Debug};

/// Whether a field takes part in generation, mutation and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Filled, mutated and checked by the verifier.
    Exported,
    /// Ignored by the verifier.
    Internal,
}

/// Static description of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub visibility: Visibility,
}

impl FieldDescriptor {
    pub const fn exported(name: &'static str) -> Self {
        Self {
            name,
            visibility: Visibility::Exported,
        }
    }

    pub const fn internal(name: &'static str) -> Self {
        Self {
            name,
            visibility: Visibility::Internal,
        }
    }

    /// Derive visibility from the name: a leading underscore marks the field
    /// internal, anything else is exported.
    pub const fn by_convention(name: &'static str) -> Self {
        match name.as_bytes() {
            [b'_', ..] => Self::internal(name),
            _ => Self::exported(name),
        }
    }

    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Exported
    }
}

/// A record type whose copy function can be verified.
///
/// `descriptor` must list every declared field in declaration order;
/// `field_mut` must resolve every exported name in it. Internal fields may be
/// left unresolved.
///
/// Most records implement this trait through [`impl_record!`](crate::impl_record).
pub trait Record: Debug + PartialEq + 'static {
    fn descriptor(&self) -> &'static [FieldDescriptor];

    fn field_mut(&mut self, name: &str) -> Option<Field<'_>>;
}

/// Return the exported field names of `record` in declaration order.
pub fn struct_fields<R: Record + ?Sized>(record: &R) -> Vec<&'static str> {
    record
        .descriptor()
        .iter()
        .filter(|field| field.is_exported())
        .map(|field| field.name)
        .collect()
}

type AssignFn = fn(&mut dyn Any, Box<dyn Any>) -> Result<(), Box<dyn Any>>;

/// Mutable, type-erased handle to one field of a record.
pub struct Field<'a> {
    name: &'static str,
    type_name: &'static str,
    value: &'a mut dyn Any,
    assign: AssignFn,
}

impl<'a> Field<'a> {
    pub fn new<T: Any>(name: &'static str, value: &'a mut T) -> Self {
        Self {
            name,
            type_name: type_name::<T>(),
            value,
            assign: assign::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the field, as reported by [`std::any::type_name`].
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True if the field is declared with type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    /// Replace the field's value.
    ///
    /// Returns the value back when its type differs from the declared one.
    pub fn set(&mut self, value: FieldValue) -> Result<(), FieldValue> {
        let FieldValue { value, type_name } = value;
        (self.assign)(&mut *self.value, value).map_err(|value| FieldValue { value, type_name })
    }
}

impl Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish()
    }
}

fn assign<T: Any>(slot: &mut dyn Any, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
    let Some(slot) = slot.downcast_mut::<T>() else {
        return Err(value);
    };
    *slot = *value.downcast::<T>()?;
    Ok(())
}

/// Owned value produced by a generator for a field.
pub struct FieldValue {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl FieldValue {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|value| Self { value, type_name })
    }
}

impl Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Implement [`Record`] for a struct from its field list.
///
/// Exported fields are listed first, in declaration order; fields named in
/// the optional `internal { .. }` block are described but never handed out.
///
/// ```
/// use clonecheck::impl_record;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Settings {
///     retries: i64,
///     hosts: Vec<String>,
///     _cache: Option<u8>,
/// }
///
/// impl_record!(Settings { retries, hosts } internal { _cache });
///
/// let settings = Settings { retries: 1, hosts: Vec::new(), _cache: None };
/// assert_eq!(clonecheck::struct_fields(&settings), ["retries", "hosts"]);
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident),* $(,)? } $(internal { $($hidden:ident),* $(,)? })?) => {
        impl $crate::Record for $ty {
            fn descriptor(&self) -> &'static [$crate::FieldDescriptor] {
                const FIELDS: &[$crate::FieldDescriptor] = &[
                    $($crate::FieldDescriptor::exported(stringify!($field)),)*
                    $($($crate::FieldDescriptor::internal(stringify!($hidden)),)*)?
                ];
                FIELDS
            }

            fn field_mut(&mut self, name: &str) -> ::std::option::Option<$crate::Field<'_>> {
                match name {
                    $(stringify!($field) => ::std::option::Option::Some(
                        $crate::Field::new(stringify!($field), &mut self.$field),
                    ),)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}
