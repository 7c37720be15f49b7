//! Error types for the struql crate.

use thiserror::Error;

use crate::op::Operation;
use crate::value::Kind;

/// Errors that can occur when building a table or evaluating filters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StruqlError {
    /// The value handed to initialization is not a record.
    #[error("root value must be a record, found {found}")]
    InvalidRoot { found: &'static str },

    /// Operation is not defined for the field's kind, or the value shapes
    /// (sequence vs. scalar) do not fit the operation.
    #[error("operation '{op}' is not supported for {kind} fields")]
    UnsupportedComparison { op: Operation, kind: Kind },

    /// The comparand (or the modified field value) is not stored in the
    /// representation the field's kind requires.
    #[error("operation '{op}' expects {expected} values, found {found}")]
    RepresentationMismatch {
        op: Operation,
        expected: &'static str,
        found: &'static str,
    },
}

/// Result type for struql operations.
pub type Result<T> = std::result::Result<T, StruqlError>;
