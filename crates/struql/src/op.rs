//! Comparison operations for filters.
//!
//! The [`Operation`] enum defines every supported comparison. Not all
//! operations apply to all kinds; see [`Operation::supports`].

use std::fmt;

use crate::value::Kind;

/// Comparison operation of a [`Filter`](crate::Filter).
///
/// Operations are grouped by the kinds they apply to:
/// - **Universal**: `Equal`, `NotEqual`
/// - **Ordered** (string, i32, i64, isize, f32, f64): `Greater`, `Lesser`
/// - **String**: `BeginWith`, `EndWith`
/// - **Sequence field**: `Exists` - the filter value is one of the field's elements
/// - **Scalar field**: `In` - the field value is one of the filter's elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Exact equality.
    Equal,
    /// Exact inequality.
    NotEqual,
    /// Field value orders after the comparand.
    Greater,
    /// Field value orders before the comparand.
    Lesser,
    /// String starts with the comparand.
    BeginWith,
    /// String ends with the comparand.
    EndWith,
    /// Sequence field contains the comparand.
    Exists,
    /// Scalar field is a member of the comparand sequence.
    In,
}

impl Operation {
    /// Returns `true` if this operation is defined for fields of `kind`.
    ///
    /// `In` additionally requires a sequence comparand, which is checked at
    /// evaluation time.
    pub fn supports(self, kind: Kind) -> bool {
        match self {
            Operation::Equal | Operation::NotEqual => true,
            Operation::Greater | Operation::Lesser => kind.is_ordered(),
            Operation::BeginWith | Operation::EndWith => kind == Kind::String,
            Operation::Exists => kind == Kind::Seq,
            Operation::In => kind != Kind::Seq,
        }
    }

    /// Returns the display name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Equal => "equal",
            Operation::NotEqual => "not_equal",
            Operation::Greater => "greater",
            Operation::Lesser => "lesser",
            Operation::BeginWith => "begin_with",
            Operation::EndWith => "end_with",
            Operation::Exists => "exists",
            Operation::In => "in",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
