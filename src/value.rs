//! Scalar attribute values bound into requests
//!
//! Filters, key conditions and item attributes only ever carry strings,
//! numbers or booleans. [`Value`] is the closed union of those three, with
//! explicit conversions from the Rust primitives and a serde-driven
//! [`Value::coerce`] for anything else that happens to serialize to a scalar.

use aws_sdk_dynamodb::types::AttributeValue;
use serde::Serialize;
use std::fmt;

use crate::error::Error;

/// A typed scalar attribute value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// String attribute (`S`)
    String(String),
    /// Number attribute (`N`), kept in DynamoDB's decimal string form
    Number(String),
    /// Boolean attribute (`BOOL`)
    Bool(bool),
}

impl Value {
    /// Coerce any serializable value into a [`Value`]
    ///
    /// Strings become [`Value::String`], integers and floats become
    /// [`Value::Number`] and booleans become [`Value::Bool`]. `None` and unit
    /// values fail with [`Error::Validation`]; lists, maps, sets and binary
    /// data fail with [`Error::UnsupportedType`].
    ///
    /// # Example
    ///
    /// ```
    /// use dynamo_builder::{Error, Value};
    ///
    /// assert_eq!(Value::coerce("Pedro")?, Value::String("Pedro".into()));
    /// assert_eq!(Value::coerce(&26)?, Value::Number("26".into()));
    /// assert!(matches!(Value::coerce(&vec![1, 2]), Err(Error::UnsupportedType(_))));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn coerce<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        let attribute: AttributeValue = serde_dynamo::to_attribute_value(value)?;
        Self::try_from(attribute)
    }

    /// Whether the value can be part of a primary key
    ///
    /// DynamoDB key attributes are limited to strings, numbers and binary.
    pub fn is_key_type(&self) -> bool {
        !matches!(self, Value::Bool(_))
    }

    /// Short name of the DynamoDB type this value maps to
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "S",
            Value::Number(_) => "N",
            Value::Bool(_) => "BOOL",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) | Value::Number(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => AttributeValue::S(s),
            Value::Number(n) => AttributeValue::N(n),
            Value::Bool(b) => AttributeValue::Bool(b),
        }
    }
}

impl TryFrom<AttributeValue> for Value {
    type Error = Error;

    fn try_from(attribute: AttributeValue) -> Result<Self, Self::Error> {
        match attribute {
            AttributeValue::S(s) => Ok(Value::String(s)),
            AttributeValue::N(n) => finite_number(n),
            AttributeValue::Bool(b) => Ok(Value::Bool(b)),
            AttributeValue::Null(_) => Err(Error::Validation("value is null".to_string())),
            AttributeValue::L(_) => Err(unsupported("list")),
            AttributeValue::M(_) => Err(unsupported("map")),
            AttributeValue::Ss(_) => Err(unsupported("string set")),
            AttributeValue::Ns(_) => Err(unsupported("number set")),
            AttributeValue::Bs(_) => Err(unsupported("binary set")),
            AttributeValue::B(_) => Err(unsupported("binary")),
            _ => Err(unsupported("unknown attribute value")),
        }
    }
}

fn unsupported(kind: &str) -> Error {
    Error::UnsupportedType(kind.to_string())
}

fn finite_number(n: String) -> Result<Value, Error> {
    match n.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Value::Number(n)),
        _ => Err(Error::UnsupportedType(format!("non-finite number `{n}`"))),
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Value {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        finite_number(value.to_string())
    }
}

impl TryFrom<f32> for Value {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        finite_number(value.to_string())
    }
}
