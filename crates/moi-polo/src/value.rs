//! # Value Tree
//!
//! Dynamically-typed values fed to the encoder and produced by the decoder.
//! Structs keep their fields in insertion order; the schema decides wire order.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// INTEGER
// =============================================================================

/// Signed integer of up to 256 bits of magnitude.
///
/// Zero is always non-negative, so equal numbers compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Integer {
    negative: bool,
    magnitude: U256,
}

impl Integer {
    /// Zero.
    pub const ZERO: Self = Self {
        negative: false,
        magnitude: U256([0; 4]),
    };

    /// Build from sign and magnitude, normalising negative zero.
    #[must_use]
    pub fn new(negative: bool, magnitude: U256) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    /// True if strictly below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Absolute value.
    #[must_use]
    pub const fn magnitude(&self) -> U256 {
        self.magnitude
    }

    /// Value as `u64` if it is non-negative and fits.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        if self.negative || self.magnitude.bits() > 64 {
            return None;
        }
        Some(self.magnitude.low_u64())
    }

    /// Value as `u128` if it is non-negative and fits.
    #[must_use]
    pub fn as_u128(&self) -> Option<u128> {
        if self.negative || self.magnitude.bits() > 128 {
            return None;
        }
        Some(self.magnitude.low_u128())
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self::new(false, U256::from(value))
    }
}

impl From<u128> for Integer {
    fn from(value: u128) -> Self {
        Self::new(false, U256::from(value))
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value < 0, U256::from(value.unsigned_abs()))
    }
}

impl From<i128> for Integer {
    fn from(value: i128) -> Self {
        Self::new(value < 0, U256::from(value.unsigned_abs()))
    }
}

impl From<U256> for Integer {
    fn from(value: U256) -> Self {
        Self::new(false, value)
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.magnitude)
    }
}

// =============================================================================
// VALUE
// =============================================================================

/// A POLO value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoloValue {
    Null,
    Bool(bool),
    Integer(Integer),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<PoloValue>),
    /// Key/value pairs; the encoder sorts them by key.
    Map(Vec<(PoloValue, PoloValue)>),
    /// Named fields; missing fields take their kind's default when encoded.
    Struct(Vec<(String, PoloValue)>),
}

impl PoloValue {
    /// Start an empty struct value.
    #[must_use]
    pub fn structure() -> Self {
        Self::Struct(Vec::new())
    }

    /// Builder-style: append a field to a struct value.
    ///
    /// Has no effect on non-struct values.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<PoloValue>) -> Self {
        if let Self::Struct(fields) = &mut self {
            fields.push((name.to_string(), value.into()));
        }
        self
    }

    /// Builder-style: append a field only when `value` is present.
    #[must_use]
    pub fn with_opt<V: Into<PoloValue>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&PoloValue> {
        match self {
            Self::Struct(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Name of the value's kind, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "array",
            Self::Map(_) => "map",
            Self::Struct(_) => "struct",
        }
    }

    /// Integer payload, if this is an integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// String payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Byte payload, if this is a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// Ordering used for map keys: numbers numerically, strings and bytes
    /// lexicographically, `false` before `true`. Mixed kinds order by kind.
    pub fn key_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Self::Bytes(a), Self::Bytes(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) => 2,
            Self::String(_) => 3,
            Self::Bytes(_) => 4,
            Self::List(_) => 5,
            Self::Map(_) => 6,
            Self::Struct(_) => 7,
        }
    }
}

impl From<bool> for PoloValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Integer> for PoloValue {
    fn from(value: Integer) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for PoloValue {
    fn from(value: u64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u128> for PoloValue {
    fn from(value: u128) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for PoloValue {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<U256> for PoloValue {
    fn from(value: U256) -> Self {
        Self::Integer(value.into())
    }
}

impl From<&str> for PoloValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PoloValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for PoloValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for PoloValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<[u8; 32]> for PoloValue {
    fn from(value: [u8; 32]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<PoloValue>> for PoloValue {
    fn from(value: Vec<PoloValue>) -> Self {
        Self::List(value)
    }
}
