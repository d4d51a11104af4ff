use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Value
///
/// Closed tagged union for everything that flows through filters and
/// statement parameters. Binding to the store collaborator matches on
/// this exhaustively; there is deliberately no open `Any` escape hatch.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    /// Epoch milliseconds, the native wide-column timestamp width.
    Timestamp(i64),
    /// Arbitrary-precision integer column (varint).
    BigInt(i128),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stable lowercase tag, used in log lines and error messages.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Timestamp(_) => "timestamp",
            Self::BigInt(_) => "bigint",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Blob(v) => write!(f, "blob[{}]", v.len()),
            Self::Timestamp(v) => write!(f, "ts:{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Self::BigInt(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v.as_millis())
    }
}

///
/// Timestamp
///
/// Thin epoch-milliseconds wrapper so record fields carry timestamp
/// intent through the value union rather than a bare integer.
///

#[derive(
    Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

///
/// FieldValue
///
/// Conversion between a concrete field type and the value union.
/// Numeric kinds box into their natural width and signedness so the
/// store collaborator receives native scalars, never an opaque box.
/// `from_value` is strict: a variant mismatch yields `None` rather
/// than a lossy coercion.
///

pub trait FieldValue: Sized {
    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_field_value_int {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => Self::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

macro_rules! impl_field_value_uint {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Uint(v) => Self::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_field_value_int!(i8, i16, i32, i64);
impl_field_value_uint!(u8, u16, u32, u64);

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v as Self),
            _ => None,
        }
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Blob(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldValue for i128 {
    fn to_value(&self) -> Value {
        Value::BigInt(*self)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::BigInt(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.0)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => Some(Self(v)),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
