//! Cell values and their kinds.
//!
//! A [`Value`] is the dynamically-typed content of one cell. Every concrete
//! Rust representation gets its own variant, so no two variants ever compare
//! equal and no coercion happens behind the caller's back. The [`Kind`] of a
//! value is the coarser classification the comparison engine dispatches on.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Cell value stored in a [`Field`](crate::Field) or used as a filter comparand.
///
/// # Example
///
/// ```
/// use struql::{Kind, Value};
///
/// let tags = Value::from(vec!["a", "b"]);
/// assert_eq!(tags.kind(), Kind::Seq);
/// assert_eq!(Value::from(5i32).kind(), Kind::I32);
/// // Same number, different representation: not equal.
/// assert_ne!(Value::from(5i32), Value::from(5i64));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Owned string.
    String(String),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// Pointer-sized signed integer.
    Isize(isize),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// 8-bit signed integer.
    I8(i8),
    /// 16-bit signed integer.
    I16(i16),
    /// 8-bit unsigned integer.
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 32-bit unsigned integer.
    U32(u32),
    /// 64-bit unsigned integer.
    U64(u64),
    /// Pointer-sized unsigned integer.
    Usize(usize),
    /// Boolean.
    Bool(bool),
    /// Unicode scalar.
    Char(char),
    /// Sequence of scalars, kept whole (never exploded into rows).
    Seq(Vec<Value>),
}

impl Value {
    /// Returns the kind this value is classified as.
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Seq(_) => Kind::Seq,
            Value::I8(_)
            | Value::I16(_)
            | Value::U8(_)
            | Value::U16(_)
            | Value::U32(_)
            | Value::U64(_)
            | Value::Usize(_)
            | Value::Bool(_)
            | Value::Char(_) => Kind::Other,
        }
    }

    /// Returns the name of the concrete representation, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Isize(_) => "isize",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::Usize(_) => "usize",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Seq(_) => "sequence",
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the sequence elements, if present.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if this is a sequence value.
    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }
}

/// Classification of a [`Value`] that drives comparison dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// String values.
    String,
    /// `i32` values.
    I32,
    /// `i64` values.
    I64,
    /// `isize` values.
    Isize,
    /// `f32` values.
    F32,
    /// `f64` values.
    F64,
    /// Sequences of scalars.
    Seq,
    /// Everything else (booleans, chars, small and unsigned integers).
    /// Only equality and set membership apply.
    Other,
}

impl Kind {
    /// Returns `true` for kinds with a natural ordering.
    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            Kind::String | Kind::I32 | Kind::I64 | Kind::Isize | Kind::F32 | Kind::F64
        )
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Seq => "sequence",
            Kind::Other => "other",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::I32(n) => write!(f, "{n}"),
            Value::I64(n) => write!(f, "{n}"),
            Value::Isize(n) => write!(f, "{n}"),
            Value::F32(n) => write!(f, "{n}"),
            Value::F64(n) => write!(f, "{n}"),
            Value::I8(n) => write!(f, "{n}"),
            Value::I16(n) => write!(f, "{n}"),
            Value::U8(n) => write!(f, "{n}"),
            Value::U16(n) => write!(f, "{n}"),
            Value::U32(n) => write!(f, "{n}"),
            Value::U64(n) => write!(f, "{n}"),
            Value::Usize(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::I32(n) => serializer.serialize_i32(*n),
            Value::I64(n) => serializer.serialize_i64(*n),
            Value::Isize(n) => serializer.serialize_i64(*n as i64),
            Value::F32(n) => serializer.serialize_f32(*n),
            Value::F64(n) => serializer.serialize_f64(*n),
            Value::I8(n) => serializer.serialize_i8(*n),
            Value::I16(n) => serializer.serialize_i16(*n),
            Value::U8(n) => serializer.serialize_u8(*n),
            Value::U16(n) => serializer.serialize_u16(*n),
            Value::U32(n) => serializer.serialize_u32(*n),
            Value::U64(n) => serializer.serialize_u64(*n),
            Value::Usize(n) => serializer.serialize_u64(*n as u64),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

// Conversions from primitive types

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive! {
    String => String,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    f32 => F32,
    f64 => F64,
    i8 => I8,
    i16 => I16,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    bool => Bool,
    char => Char,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}
