//! Failure reasons reported by the verifier.
//!
//! Each variant names the stage that failed and, where one exists, the field
//! responsible. Values are captured as their `Debug` rendering at the failure
//! point so the error outlives the records it describes.

use thiserror::Error;

/// Why a record could not be filled with generated values.
#[derive(Debug, Error)]
pub enum FillError {
    /// No generator claimed the field's type.
    #[error("field {field:?} has unsupported type to set - {type_name}")]
    Unsupported {
        field: &'static str,
        type_name: &'static str,
    },

    /// A generator produced a value of a different type than the field's.
    #[error("generator produced {produced} for field {field:?} of type {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        produced: &'static str,
    },

    /// The record describes an exported field it does not hand out.
    #[error("exported field {field:?} is not accessible on the record")]
    Inaccessible { field: &'static str },
}

impl FillError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Unsupported { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::Inaccessible { field } => *field,
        }
    }
}

/// A failed verification run.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The original record could not be filled.
    #[error("cannot autofill original record: {0}")]
    OrigFill(#[source] FillError),

    /// The reference record could not be filled.
    #[error("cannot autofill reference record: {0}")]
    RefFill(#[source] FillError),

    /// Two independently filled records differ, so the generators are not
    /// deterministic.
    #[error(
        "newly created and filled records (original and reference) are not the same: \
         orig - {orig}, ref - {reference}"
    )]
    RefOrigEqual { orig: String, reference: String },

    /// The copy differs from the original before any field was changed.
    #[error("newly created clone is not the same as the original: orig - {orig}, clone - {clone}")]
    CloneOrigNotEqual { orig: String, clone: String },

    /// No mutator claimed the field's type.
    #[error("field {field:?} has unsupported type to change - {type_name}")]
    Change { field: String, type_name: &'static str },

    /// The field does not exist on the record, or is not exported.
    #[error("field {field:?} was not found in the record {record}")]
    FieldNotFound { field: String, record: String },

    /// Changing a field of the clone changed the original: the field shares
    /// storage between the two.
    #[error(
        "the original ({orig}) is different from the reference ({reference}) after the clone \
         field {field:?} has been changed, clone: {clone}"
    )]
    OrigChanged {
        field: String,
        orig: String,
        reference: String,
        clone: String,
    },

    /// Changing a field of the clone left it equal to the original.
    #[error("clone field {field:?} has been updated but the clone is equal to the original: {clone}")]
    CloneOrigEqual { field: String, clone: String },
}

impl VerifyError {
    /// The field this failure is attributed to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::OrigFill(err) | Self::RefFill(err) => Some(err.field()),
            Self::Change { field, .. }
            | Self::FieldNotFound { field, .. }
            | Self::OrigChanged { field, .. }
            | Self::CloneOrigEqual { field, .. } => Some(field.as_str()),
            Self::RefOrigEqual { .. } | Self::CloneOrigNotEqual { .. } => None,
        }
    }
}
