use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::timestamp;

/// The datatype an attribute is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    UInt16,
    Int32,
    Double,
    String,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Boolean => "Boolean",
            DataType::UInt16 => "UInt16",
            DataType::Int32 => "Int32",
            DataType::Double => "Double",
            DataType::String => "String",
        };
        f.write_str(name)
    }
}

/// A tagged attribute or argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    Boolean(bool),
    UInt16(u16),
    Int32(i32),
    Double(f64),
    String(String),
}

impl Variant {
    pub fn datatype(&self) -> DataType {
        match self {
            Variant::Boolean(_) => DataType::Boolean,
            Variant::UInt16(_) => DataType::UInt16,
            Variant::Int32(_) => DataType::Int32,
            Variant::Double(_) => DataType::Double,
            Variant::String(_) => DataType::String,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Boolean(v) => write!(f, "{v}"),
            Variant::UInt16(v) => write!(f, "{v}"),
            Variant::Int32(v) => write!(f, "{v}"),
            Variant::Double(v) => write!(f, "{v}"),
            Variant::String(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("expected a {expected} value but got {actual}")]
pub struct FromVariantError {
    pub expected: DataType,
    pub actual: DataType,
}

macro_rules! impl_variant_conversions {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Variant {
            fn from(value: $ty) -> Self {
                Variant::$variant(value)
            }
        }

        impl TryFrom<Variant> for $ty {
            type Error = FromVariantError;

            fn try_from(value: Variant) -> Result<Self, Self::Error> {
                match value {
                    Variant::$variant(v) => Ok(v),
                    other => Err(FromVariantError {
                        expected: DataType::$variant,
                        actual: other.datatype(),
                    }),
                }
            }
        }
    };
}

impl_variant_conversions!(Boolean, bool);
impl_variant_conversions!(UInt16, u16);
impl_variant_conversions!(Int32, i32);
impl_variant_conversions!(Double, f64);
impl_variant_conversions!(String, String);

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

/// A value together with the time it was written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataValue {
    pub value: Variant,
    /// milliseconds since epoch
    pub source_timestamp: u64,
}

impl DataValue {
    pub fn new(value: Variant) -> Self {
        Self {
            value,
            source_timestamp: timestamp(),
        }
    }
}
