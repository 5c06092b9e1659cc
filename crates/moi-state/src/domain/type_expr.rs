//! # Type Expressions
//!
//! Manifest type strings parsed once into a tree:
//!
//! ```text
//! type      = primitive | array | map | class
//! primitive = null | bool | bytes | address | string
//!           | u64 | u256 | i64 | i256 | bigint
//! array     = "[" digits? "]" type
//! map       = "map[" type "]" type
//! class     = "class." name
//! ```

use crate::domain::manifest::{ElementDescriptor, CLASS_PREFIX};
use crate::errors::StateError;
use moi_polo::PoloSchema;
use std::fmt;
use std::str::FromStr;

/// Scalar types a manifest can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Bool,
    Bytes,
    Address,
    String,
    U64,
    U256,
    I64,
    I256,
    BigInt,
}

impl Primitive {
    pub const ALL: [Primitive; 10] = [
        Self::Null,
        Self::Bool,
        Self::Bytes,
        Self::Address,
        Self::String,
        Self::U64,
        Self::U256,
        Self::I64,
        Self::I256,
        Self::BigInt,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::Address => "address",
            Self::String => "string",
            Self::U64 => "u64",
            Self::U256 => "u256",
            Self::I64 => "i64",
            Self::I256 => "i256",
            Self::BigInt => "bigint",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Wire schema. Addresses are bytes; every integer width is an integer.
    #[must_use]
    pub fn schema(&self) -> PoloSchema {
        match self {
            Self::Null => PoloSchema::Null,
            Self::Bool => PoloSchema::Bool,
            Self::Bytes | Self::Address => PoloSchema::Bytes,
            Self::String => PoloSchema::String,
            Self::U64 | Self::U256 | Self::I64 | Self::I256 | Self::BigInt => PoloSchema::Integer,
        }
    }
}

/// Parsed manifest type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Primitive(Primitive),
    /// `[]T`
    Array(Box<TypeExpr>),
    /// `[N]T`
    FixedArray(u64, Box<TypeExpr>),
    /// `map[K]V`
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// `class.Name`, holding the full expression.
    Class(String),
}

impl TypeExpr {
    /// Parse a complete type expression.
    pub fn parse(input: &str) -> Result<Self, StateError> {
        let mut parser = Parser { input, pos: 0 };
        let ty = parser.parse_type()?;
        if parser.pos != input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_) | Self::FixedArray(..))
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(..))
    }

    /// Class expression (`class.Name`), if this is a class.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            _ => None,
        }
    }

    /// Element type of an array.
    #[must_use]
    pub fn element_type(&self) -> Option<&TypeExpr> {
        match self {
            Self::Array(inner) | Self::FixedArray(_, inner) => Some(inner),
            _ => None,
        }
    }

    /// Key and value types of a map.
    #[must_use]
    pub fn map_types(&self) -> Option<(&TypeExpr, &TypeExpr)> {
        match self {
            Self::Map(key, value) => Some((key, value)),
            _ => None,
        }
    }

    /// Wire schema, expanding classes through `descriptor`.
    pub fn to_schema(&self, descriptor: &ElementDescriptor) -> Result<PoloSchema, StateError> {
        self.schema_with(descriptor, &mut Vec::new())
    }

    fn schema_with(
        &self,
        descriptor: &ElementDescriptor,
        visiting: &mut Vec<String>,
    ) -> Result<PoloSchema, StateError> {
        match self {
            Self::Primitive(p) => Ok(p.schema()),
            Self::Array(inner) | Self::FixedArray(_, inner) => {
                Ok(PoloSchema::array(inner.schema_with(descriptor, visiting)?))
            }
            Self::Map(key, value) => Ok(PoloSchema::map(
                key.schema_with(descriptor, visiting)?,
                value.schema_with(descriptor, visiting)?,
            )),
            Self::Class(name) => {
                if visiting.iter().any(|v| v == name) {
                    return Err(StateError::RecursiveClass(name.clone()));
                }
                let class = descriptor
                    .class(name)
                    .ok_or_else(|| StateError::UnknownClass(name.clone()))?;

                visiting.push(name.clone());
                let mut fields = Vec::with_capacity(class.fields.len());
                for field in &class.fields {
                    let ty = TypeExpr::parse(&field.ty)?;
                    fields.push((field.label.clone(), ty.schema_with(descriptor, visiting)?));
                }
                visiting.pop();

                Ok(PoloSchema::Struct(fields))
            }
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.as_str()),
            Self::Array(inner) => write!(f, "[]{inner}"),
            Self::FixedArray(len, inner) => write!(f, "[{len}]{inner}"),
            Self::Map(key, value) => write!(f, "map[{key}]{value}"),
            Self::Class(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeExpr {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// PARSER
// =============================================================================

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: &str) -> StateError {
        StateError::TypeParse {
            input: self.input.to_string(),
            position: self.pos,
            reason: reason.to_string(),
        }
    }

    fn rest(&self) -> &'a str {
        let input = self.input;
        &input[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), StateError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{token}'")))
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn parse_type(&mut self) -> Result<TypeExpr, StateError> {
        if self.eat("[") {
            return self.parse_array();
        }
        if self.eat("map[") {
            let key = self.parse_type()?;
            self.expect("]")?;
            let value = self.parse_type()?;
            return Ok(TypeExpr::Map(Box::new(key), Box::new(value)));
        }
        if self.eat(CLASS_PREFIX) {
            let start = self.pos - CLASS_PREFIX.len();
            let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
            if name.is_empty() {
                return Err(self.error("expected class name"));
            }
            return Ok(TypeExpr::Class(self.input[start..self.pos].to_string()));
        }

        let name = self.take_while(|c| c.is_ascii_alphanumeric());
        if name.is_empty() {
            return Err(self.error("expected type"));
        }
        match Primitive::from_name(name) {
            Some(p) => Ok(TypeExpr::Primitive(p)),
            None => {
                self.pos -= name.len();
                Err(self.error(&format!("unsupported data type '{name}'")))
            }
        }
    }

    fn parse_array(&mut self) -> Result<TypeExpr, StateError> {
        let digits = self.take_while(|c| c.is_ascii_digit());
        let len = if digits.is_empty() {
            None
        } else {
            let parsed = digits.parse::<u64>();
            Some(parsed.map_err(|_| self.error("array length out of range"))?)
        };
        self.expect("]")?;
        let inner = Box::new(self.parse_type()?);
        Ok(match len {
            Some(len) => TypeExpr::FixedArray(len, inner),
            None => TypeExpr::Array(inner),
        })
    }
}
