//! # Storage Keys
//!
//! A storage key is a 256-bit unsigned integer that the node renders as 32
//! big-endian bytes. Slot numbers, digests and raw byte strings all promote
//! into it; inputs wider than 256 bits are rejected rather than truncated.

use crate::errors::StateError;
use moi_crypto::Hash;
use moi_types::hex::{bytes_to_hex, hex_to_bytes};
use primitive_types::U256;
use std::fmt;
use std::str::FromStr;

/// Byte width of a storage key.
pub const STORAGE_KEY_LENGTH: usize = 32;

/// 32-byte big-endian storage slot address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StorageKey(U256);

impl StorageKey {
    /// Key for a declared slot number.
    #[must_use]
    pub fn from_u64(slot: u64) -> Self {
        Self(U256::from(slot))
    }

    #[must_use]
    pub const fn from_u256(value: U256) -> Self {
        Self(value)
    }

    /// Key whose bytes are a digest.
    #[must_use]
    pub fn from_hash(digest: Hash) -> Self {
        Self(U256::from_big_endian(&digest))
    }

    /// Big-endian bytes of any length. Leading zero bytes are ignored; more
    /// than 256 significant bits is an overflow.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StateError> {
        let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        let significant = &bytes[start..];
        if significant.len() > STORAGE_KEY_LENGTH {
            let bits = significant.len() * 8 - significant[0].leading_zeros() as usize;
            return Err(StateError::StorageKeyOverflow { bits });
        }
        Ok(Self(U256::from_big_endian(significant)))
    }

    /// `0x`-prefixed (or bare) hex.
    pub fn from_hex(value: &str) -> Result<Self, StateError> {
        Self::from_bytes(&hex_to_bytes(value)?)
    }

    /// Numeric value.
    #[must_use]
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Exactly 32 big-endian bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; STORAGE_KEY_LENGTH] {
        let mut out = [0u8; STORAGE_KEY_LENGTH];
        self.0.to_big_endian(&mut out);
        out
    }

    /// `0x` followed by 64 lowercase hex digits.
    #[must_use]
    pub fn hex(&self) -> String {
        bytes_to_hex(self.to_bytes())
    }
}

impl From<u64> for StorageKey {
    fn from(slot: u64) -> Self {
        Self::from_u64(slot)
    }
}

impl From<U256> for StorageKey {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for StorageKey {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
