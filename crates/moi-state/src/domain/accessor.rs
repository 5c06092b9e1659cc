//! # Accessors
//!
//! Each accessor maps a storage key to the key of one addressed child. A
//! path is a left fold of accessors over a base slot:
//!
//! ```text
//! Length          k -> k
//! Property(key)   k -> sum256(k || "." || sum256(polo(key)))
//! ArrayIndex(i)   k -> sum256(k) + i   (mod 2^256)
//! ClassField(s)   k -> sum256(k) + s   (mod 2^256)
//! ```

use crate::domain::storage_key::StorageKey;
use moi_crypto::{sum256, sum256_many, Hash};
use moi_polo::{Integer, Polorizer};
use moi_types::ParticipantId;
use primitive_types::U256;
use tracing::trace;

/// Separator between a map's key and the hashed property key.
const PROPERTY_SEPARATOR: &[u8] = b".";

/// Map key addressed by a property accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    String(String),
    Integer(Integer),
    Bool(bool),
    Bytes(Vec<u8>),
}

impl PropertyKey {
    /// Top-level POLO encoding of the key.
    #[must_use]
    pub fn polorize(&self) -> Vec<u8> {
        let mut polorizer = Polorizer::new();
        match self {
            Self::String(value) => polorizer.polorize_string(value),
            Self::Integer(value) => polorizer.polorize_integer(*value),
            Self::Bool(value) => polorizer.polorize_bool(*value),
            Self::Bytes(value) => polorizer.polorize_bytes(value),
        }
        polorizer.bytes()
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PropertyKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Integer> for PropertyKey {
    fn from(value: Integer) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for PropertyKey {
    fn from(value: u64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for PropertyKey {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u128> for PropertyKey {
    fn from(value: u128) -> Self {
        Self::Integer(value.into())
    }
}

impl From<U256> for PropertyKey {
    fn from(value: U256) -> Self {
        Self::Integer(value.into())
    }
}

impl From<Vec<u8>> for PropertyKey {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for PropertyKey {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<ParticipantId> for PropertyKey {
    fn from(value: ParticipantId) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }
}

/// One step of a storage path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// The container's own slot, which holds its length.
    Length,
    /// Map entry, carrying the digest of the encoded key.
    Property(Hash),
    /// Array element.
    ArrayIndex(u64),
    /// Class member at its declared slot.
    ClassField(u64),
}

impl Accessor {
    /// Property accessor for a map key.
    #[must_use]
    pub fn property(key: impl Into<PropertyKey>) -> Self {
        Self::Property(sum256(&key.into().polorize()))
    }

    /// Key of the child this accessor addresses under `key`.
    #[must_use]
    pub fn access(&self, key: StorageKey) -> StorageKey {
        match self {
            Self::Length => key,
            Self::Property(hashed) => {
                let current = key.to_bytes();
                StorageKey::from_hash(sum256_many(&[&current[..], PROPERTY_SEPARATOR, &hashed[..]]))
            }
            Self::ArrayIndex(offset) | Self::ClassField(offset) => offset_key(key, *offset),
        }
    }
}

fn offset_key(key: StorageKey, offset: u64) -> StorageKey {
    let start = U256::from_big_endian(&sum256(&key.to_bytes()));
    let (slot, _) = start.overflowing_add(U256::from(offset));
    StorageKey::from_u256(slot)
}

/// Fold `accessors` over `base`, left to right.
pub fn derive(base: impl Into<StorageKey>, accessors: &[Accessor]) -> StorageKey {
    let base = base.into();
    let key = accessors
        .iter()
        .fold(base, |key, accessor| accessor.access(key));
    trace!(base = %base, steps = accessors.len(), key = %key, "Derived storage key");
    key
}
