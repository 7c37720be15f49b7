//! Filters and the comparison engine.
//!
//! A [`Filter`] is a single predicate: a target field name, an
//! [`Operation`], a comparand, and an optional [`Modifier`] applied to the
//! field's value before comparing. [`Filter::matches`] dispatches on the
//! field's [`Kind`] and never coerces between representations.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, StruqlError};
use crate::op::Operation;
use crate::row::Field;
use crate::value::{Kind, Value};

/// Pure transform applied to a field's value right before comparison.
///
/// The stored field is never touched; the modifier sees a borrow and returns
/// a fresh value. The filter's own comparand is never modified.
///
/// # Example
///
/// ```
/// use struql::{Modifier, Value};
///
/// let lower = Modifier::lowercase();
/// assert_eq!(lower.apply(&Value::from("MiXeD")), Value::from("mixed"));
/// assert_eq!(lower.apply(&Value::from(3i32)), Value::from(3i32));
/// ```
#[derive(Clone)]
pub struct Modifier(Arc<dyn Fn(&Value) -> Value + Send + Sync>);

impl Modifier {
    /// Wraps a transform function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Modifier(Arc::new(f))
    }

    /// Applies the transform.
    pub fn apply(&self, value: &Value) -> Value {
        (self.0)(value)
    }

    /// Lowercases strings, including strings inside sequences.
    pub fn lowercase() -> Self {
        Modifier::new(|value| map_strings(value, &str::to_lowercase))
    }

    /// Uppercases strings, including strings inside sequences.
    pub fn uppercase() -> Self {
        Modifier::new(|value| map_strings(value, &str::to_uppercase))
    }

    /// Trims surrounding whitespace from strings, including strings inside
    /// sequences.
    pub fn trim() -> Self {
        Modifier::new(|value| map_strings(value, &|s: &str| s.trim().to_string()))
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Modifier(..)")
    }
}

fn map_strings(value: &Value, f: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        Value::Seq(items) => Value::Seq(items.iter().map(|item| map_strings(item, f)).collect()),
        other => other.clone(),
    }
}

/// A single predicate over one field of a row.
///
/// # Example
///
/// ```
/// use struql::{Field, Filter, Modifier, Operation, Value};
///
/// let field = Field::new("name", Value::from("Ada Lovelace"), 0);
///
/// let filter = Filter::new("name", Operation::BeginWith, "ada")
///     .with_modifier(Modifier::lowercase());
/// assert!(filter.matches(&field).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    target: String,
    op: Operation,
    value: Value,
    modifier: Option<Modifier>,
}

impl Filter {
    /// Creates a filter without a modifier.
    pub fn new(target: impl Into<String>, op: Operation, value: impl Into<Value>) -> Self {
        Filter {
            target: target.into(),
            op,
            value: value.into(),
            modifier: None,
        }
    }

    /// Sets the modifier applied to the field value before comparison.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// Returns the name of the field this filter applies to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the comparison operation.
    pub fn operation(&self) -> Operation {
        self.op
    }

    /// Returns the comparand.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the modifier, if any.
    pub fn modifier(&self) -> Option<&Modifier> {
        self.modifier.as_ref()
    }

    /// Evaluates this filter against a field.
    ///
    /// Returns [`StruqlError::UnsupportedComparison`] when the operation is
    /// not defined for the field's kind (or `In` receives a non-sequence
    /// comparand) and [`StruqlError::RepresentationMismatch`] when the
    /// comparand or modified value is not in the representation the
    /// operation needs. Equality never errors: values of different
    /// representations are simply unequal.
    pub fn matches(&self, field: &Field) -> Result<bool> {
        let kind = field.kind();
        if !self.op.supports(kind) {
            return Err(self.unsupported(kind));
        }

        let subject = self.subject(field);

        match self.op {
            Operation::Equal => Ok(*subject == self.value),
            Operation::NotEqual => Ok(*subject != self.value),
            Operation::Greater => Ok(self.ordering(kind, &subject)? == Some(Ordering::Greater)),
            Operation::Lesser => Ok(self.ordering(kind, &subject)? == Some(Ordering::Less)),
            Operation::BeginWith => {
                let (field_str, pattern) = self.strings(&subject)?;
                Ok(field_str.starts_with(pattern))
            }
            Operation::EndWith => {
                let (field_str, pattern) = self.strings(&subject)?;
                Ok(field_str.ends_with(pattern))
            }
            Operation::Exists => {
                let items = subject
                    .as_seq()
                    .ok_or_else(|| self.mismatch(Kind::Seq.as_str(), subject.type_name()))?;
                Ok(items.contains(&self.value))
            }
            Operation::In => {
                let set = self.value.as_seq().ok_or_else(|| self.unsupported(kind))?;
                Ok(set.contains(&*subject))
            }
        }
    }

    fn subject<'a>(&self, field: &'a Field) -> Cow<'a, Value> {
        match &self.modifier {
            Some(modifier) => Cow::Owned(modifier.apply(field.value())),
            None => Cow::Borrowed(field.value()),
        }
    }

    // Both sides must hold the field's own representation.
    fn ordering(&self, kind: Kind, subject: &Value) -> Result<Option<Ordering>> {
        if subject.kind() != kind {
            return Err(self.mismatch(kind.as_str(), subject.type_name()));
        }
        match (subject, &self.value) {
            (Value::String(a), Value::String(b)) => Ok(Some(a.as_str().cmp(b.as_str()))),
            (Value::I32(a), Value::I32(b)) => Ok(Some(a.cmp(b))),
            (Value::I64(a), Value::I64(b)) => Ok(Some(a.cmp(b))),
            (Value::Isize(a), Value::Isize(b)) => Ok(Some(a.cmp(b))),
            (Value::F32(a), Value::F32(b)) => Ok(a.partial_cmp(b)),
            (Value::F64(a), Value::F64(b)) => Ok(a.partial_cmp(b)),
            _ => Err(self.mismatch(kind.as_str(), self.value.type_name())),
        }
    }

    fn strings<'a>(&'a self, subject: &'a Value) -> Result<(&'a str, &'a str)> {
        let field_str = subject
            .as_str()
            .ok_or_else(|| self.mismatch(Kind::String.as_str(), subject.type_name()))?;
        let pattern = self
            .value
            .as_str()
            .ok_or_else(|| self.mismatch(Kind::String.as_str(), self.value.type_name()))?;
        Ok((field_str, pattern))
    }

    fn unsupported(&self, kind: Kind) -> StruqlError {
        StruqlError::UnsupportedComparison { op: self.op, kind }
    }

    fn mismatch(&self, expected: &'static str, found: &'static str) -> StruqlError {
        StruqlError::RepresentationMismatch {
            op: self.op,
            expected,
            found,
        }
    }
}
