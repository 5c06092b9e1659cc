//! # Identifiers
//!
//! 32-byte identifiers for participants, assets and logics.
//!
//! The first byte is a tag: the high nibble is the [`IdentifierKind`] and the
//! low nibble the version. Bytes `4..28` are the fingerprint and bytes
//! `28..32` a big-endian variant number.
//!
//! Assets and logics also exist in legacy forms (36 and 35 bytes) that prefix
//! the 32-byte account address. [`AssetId::address`] and [`LogicId::address`]
//! return the participant implied by either form.

use crate::errors::TypeError;
use crate::hex::{bytes_to_hex, hex_to_bytes, is_hex};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of a current-format identifier.
pub const IDENTIFIER_LENGTH: usize = 32;

const LEGACY_ASSET_LENGTH: usize = 36;
const LEGACY_LOGIC_LENGTH: usize = 35;

/// Kind encoded in the high nibble of an identifier's tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Participant = 0,
    Asset = 1,
    Logic = 2,
}

impl IdentifierKind {
    fn from_tag(tag: u8) -> Option<Self> {
        match tag >> 4 {
            0 => Some(Self::Participant),
            1 => Some(Self::Asset),
            2 => Some(Self::Logic),
            _ => None,
        }
    }
}

fn parse_hex(value: &str) -> Result<Vec<u8>, TypeError> {
    if !is_hex(value, None) {
        return Err(TypeError::InvalidHex(value.to_string()));
    }
    hex_to_bytes(value)
}

fn trailing_address(bytes: &[u8]) -> ParticipantId {
    let mut address = [0u8; IDENTIFIER_LENGTH];
    address.copy_from_slice(&bytes[bytes.len() - IDENTIFIER_LENGTH..]);
    ParticipantId(address)
}

/// Display, `FromStr` and hex-string serde for an identifier type.
macro_rules! hex_identifier {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::from_hex(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Self::from_hex(&value).map_err(de::Error::custom)
            }
        }
    };
}

// =============================================================================
// PARTICIPANT ID
// =============================================================================

/// Account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ParticipantId([u8; IDENTIFIER_LENGTH]);

impl ParticipantId {
    /// All-zero id, used for an absent sponsor.
    pub const ZERO: Self = Self([0; IDENTIFIER_LENGTH]);

    /// Wrap raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; IDENTIFIER_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice of exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        let array: [u8; IDENTIFIER_LENGTH] =
            bytes.try_into().map_err(|_| TypeError::InvalidLength {
                kind: "participant id",
                expected: "32",
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }

    /// Parse `0x`-prefixed hex.
    pub fn from_hex(value: &str) -> Result<Self, TypeError> {
        Self::from_bytes(&parse_hex(value)?)
    }

    /// Raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; IDENTIFIER_LENGTH] {
        &self.0
    }

    /// Lowercase `0x` hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.0)
    }

    /// Kind recorded in the tag byte, if recognised.
    #[must_use]
    pub fn kind(&self) -> Option<IdentifierKind> {
        IdentifierKind::from_tag(self.0[0])
    }

    /// Version recorded in the tag byte.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.0[0] & 0x0f
    }

    /// Bytes `4..28`.
    #[must_use]
    pub fn fingerprint(&self) -> &[u8] {
        &self.0[4..28]
    }

    /// Big-endian `u32` in bytes `28..32`.
    #[must_use]
    pub fn variant(&self) -> u32 {
        u32::from_be_bytes([self.0[28], self.0[29], self.0[30], self.0[31]])
    }
}

impl From<[u8; IDENTIFIER_LENGTH]> for ParticipantId {
    fn from(bytes: [u8; IDENTIFIER_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ParticipantId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

hex_identifier!(ParticipantId);

// =============================================================================
// ASSET ID
// =============================================================================

/// Asset identifier, 32 bytes or the 36-byte legacy form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(Vec<u8>);

impl AssetId {
    /// Copy from a 32 or 36 byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        match bytes.len() {
            IDENTIFIER_LENGTH | LEGACY_ASSET_LENGTH => Ok(Self(bytes.to_vec())),
            actual => Err(TypeError::InvalidLength {
                kind: "asset id",
                expected: "32 or 36",
                actual,
            }),
        }
    }

    /// Parse `0x`-prefixed hex.
    pub fn from_hex(value: &str) -> Result<Self, TypeError> {
        Self::from_bytes(&parse_hex(value)?)
    }

    /// Raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase `0x` hex. This is the form carried in operation payloads.
    #[must_use]
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Account that holds the asset's state.
    #[must_use]
    pub fn address(&self) -> ParticipantId {
        trailing_address(&self.0)
    }
}

hex_identifier!(AssetId);

// =============================================================================
// LOGIC ID
// =============================================================================

/// Logic identifier, 32 bytes or the 35-byte legacy form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicId(Vec<u8>);

impl LogicId {
    /// Copy from a 32 or 35 byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        match bytes.len() {
            IDENTIFIER_LENGTH | LEGACY_LOGIC_LENGTH => Ok(Self(bytes.to_vec())),
            actual => Err(TypeError::InvalidLength {
                kind: "logic id",
                expected: "32 or 35",
                actual,
            }),
        }
    }

    /// Parse `0x`-prefixed hex.
    pub fn from_hex(value: &str) -> Result<Self, TypeError> {
        Self::from_bytes(&parse_hex(value)?)
    }

    /// Raw bytes. This is the form carried in operation payloads.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase `0x` hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// Account that holds the logic's state.
    #[must_use]
    pub fn address(&self) -> ParticipantId {
        trailing_address(&self.0)
    }
}

hex_identifier!(LogicId);
