//! Field value representation and conversions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for value-to-property conversions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The source value's type cannot supply the property's type.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Name of the property's type.
        expected: &'static str,
        /// Name of the source value's type.
        got: &'static str,
    },

    /// The source value does not fit the property's type.
    #[error("value {value} out of range for {target}")]
    OutOfRange {
        /// The offending value, rendered for diagnostics.
        value: String,
        /// Name of the property's type.
        target: &'static str,
    },
}

/// Value representation for data source fields.
///
/// This enum can hold any value a field reader produces for a named
/// field. `Null` is the source's null marker; it is also used where a
/// field declaration carries no default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null or unset value
    Null,
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 128-bit signed integer
    I128(i128),
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// 128-bit unsigned integer
    U128(u128),
    /// 32-bit floating point number
    F32(f32),
    /// 64-bit floating point number
    F64(f64),
    /// Boolean value
    Bool(bool),
    /// UTF-8 string
    String(String),
}

impl Value {
    /// Returns `true` if this is the null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the name of this value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::I128(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::U128(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value)
            }
        }
    )*};
}

value_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Conversion from a dynamically-typed [`Value`] into a property type.
///
/// `Value::Null` converts to the type's zero-value. Integer targets
/// accept any integer value that fits at runtime; a value that does not
/// fit fails with [`ValueError::OutOfRange`]. Conversions across kinds
/// (e.g. a string value into an integer property) fail with
/// [`ValueError::TypeMismatch`].
pub trait FromValue: Sized {
    /// Converts `value` into the target type.
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// Range-checked integer conversion.
fn int_cast<S, T>(value: S, target: &'static str) -> Result<T, ValueError>
where
    S: Copy + fmt::Display,
    T: TryFrom<S>,
{
    T::try_from(value).map_err(|_| ValueError::OutOfRange {
        value: value.to_string(),
        target,
    })
}

macro_rules! int_from_value {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Null => Ok(0),
                    Value::I8(v) => int_cast(v, $name),
                    Value::I16(v) => int_cast(v, $name),
                    Value::I32(v) => int_cast(v, $name),
                    Value::I64(v) => int_cast(v, $name),
                    Value::I128(v) => int_cast(v, $name),
                    Value::U8(v) => int_cast(v, $name),
                    Value::U16(v) => int_cast(v, $name),
                    Value::U32(v) => int_cast(v, $name),
                    Value::U64(v) => int_cast(v, $name),
                    Value::U128(v) => int_cast(v, $name),
                    other => Err(ValueError::TypeMismatch {
                        expected: $name,
                        got: other.type_name(),
                    }),
                }
            }
        }
    )*};
}

int_from_value! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(0.0),
            Value::F32(v) => Ok(v),
            other => Err(ValueError::TypeMismatch {
                expected: "f32",
                got: other.type_name(),
            }),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(0.0),
            Value::F32(v) => Ok(v.into()),
            Value::F64(v) => Ok(v),
            other => Err(ValueError::TypeMismatch {
                expected: "f64",
                got: other.type_name(),
            }),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(false),
            Value::Bool(v) => Ok(v),
            other => Err(ValueError::TypeMismatch {
                expected: "bool",
                got: other.type_name(),
            }),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(String::new()),
            Value::String(v) => Ok(v),
            other => Err(ValueError::TypeMismatch {
                expected: "string",
                got: other.type_name(),
            }),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}
