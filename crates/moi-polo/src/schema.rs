//! # Schema AST
//!
//! Describes the shape a value is encoded with. Struct field order is the
//! wire order and is part of the contract with the node.

use crate::value::{Integer, PoloValue};

/// Schema of a POLO value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoloSchema {
    Null,
    Bool,
    Integer,
    String,
    Bytes,
    Array(Box<PoloSchema>),
    Map {
        keys: Box<PoloSchema>,
        values: Box<PoloSchema>,
    },
    Struct(Vec<(String, PoloSchema)>),
}

impl PoloSchema {
    /// Array of `values`.
    #[must_use]
    pub fn array(values: PoloSchema) -> Self {
        Self::Array(Box::new(values))
    }

    /// Map from `keys` to `values`.
    #[must_use]
    pub fn map(keys: PoloSchema, values: PoloSchema) -> Self {
        Self::Map {
            keys: Box::new(keys),
            values: Box::new(values),
        }
    }

    /// Struct with fields in the given (wire) order.
    #[must_use]
    pub fn structure<'a>(fields: impl IntoIterator<Item = (&'a str, PoloSchema)>) -> Self {
        Self::Struct(
            fields
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
        )
    }

    /// Name of the schema kind, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Array(_) => "array",
            Self::Map { .. } => "map",
            Self::Struct(_) => "struct",
        }
    }

    /// Value encoded for a struct field that is absent from its value.
    ///
    /// Integers and booleans have zero values on the wire; every other kind
    /// is written as null.
    #[must_use]
    pub fn absent_value(&self) -> PoloValue {
        match self {
            Self::Integer => PoloValue::Integer(Integer::ZERO),
            Self::Bool => PoloValue::Bool(false),
            _ => PoloValue::Null,
        }
    }

    /// Value produced when a null element is decoded with this schema.
    #[must_use]
    pub fn default_value(&self) -> PoloValue {
        match self {
            Self::Null => PoloValue::Null,
            Self::Bool => PoloValue::Bool(false),
            Self::Integer => PoloValue::Integer(Integer::ZERO),
            Self::String => PoloValue::String(String::new()),
            Self::Bytes => PoloValue::Bytes(Vec::new()),
            Self::Array(_) => PoloValue::List(Vec::new()),
            Self::Map { .. } => PoloValue::Map(Vec::new()),
            Self::Struct(fields) => PoloValue::Struct(
                fields
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.default_value()))
                    .collect(),
            ),
        }
    }
}
