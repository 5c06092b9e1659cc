//! # Wire Primitives
//!
//! Wire type tags, unsigned LEB128 varints and minimal big-endian integer
//! magnitudes. Every element on the wire is introduced by a varint whose low
//! nibble is the wire type; inside a pack header the remaining bits carry the
//! element's offset into the pack body.

use crate::errors::PoloError;
use primitive_types::U256;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Wire type of a POLO element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Null = 0,
    False = 1,
    True = 2,
    PosInt = 3,
    NegInt = 4,
    Raw = 5,
    Word = 6,
    Float = 7,
    Doc = 13,
    Pack = 14,
    Load = 15,
}

impl WireType {
    /// Human-readable name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::False | Self::True => "bool",
            Self::PosInt | Self::NegInt => "integer",
            Self::Raw => "raw",
            Self::Word => "word",
            Self::Float => "float",
            Self::Doc => "document",
            Self::Pack => "pack",
            Self::Load => "load",
        }
    }
}

impl TryFrom<u64> for WireType {
    type Error = PoloError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Null,
            1 => Self::False,
            2 => Self::True,
            3 => Self::PosInt,
            4 => Self::NegInt,
            5 => Self::Raw,
            6 => Self::Word,
            7 => Self::Float,
            13 => Self::Doc,
            14 => Self::Pack,
            15 => Self::Load,
            other => return Err(PoloError::UnknownWireType(other)),
        })
    }
}

// =============================================================================
// VARINTS
// =============================================================================

/// Append `value` as an unsigned LEB128 varint.
pub fn write_varint(value: u64, out: &mut Vec<u8>) {
    let mut value = value;
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Read an unsigned LEB128 varint from the start of `data`.
///
/// Returns the value and the number of bytes consumed.
pub fn read_varint(data: &[u8]) -> Result<(u64, usize), PoloError> {
    let mut value: u64 = 0;
    for (index, byte) in data.iter().enumerate() {
        // the tenth byte may only carry bit 63
        if index >= 10 || (index == 9 && byte & 0x7f > 1) {
            return Err(PoloError::MalformedVarint { offset: index });
        }
        value |= u64::from(byte & 0x7f) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok((value, index + 1));
        }
    }
    Err(PoloError::MalformedVarint { offset: data.len() })
}

/// Tag placed in a pack header: element offset in the high bits, wire type in
/// the low nibble.
pub fn header_tag(offset: usize, wire: WireType) -> u64 {
    ((offset as u64) << 4) | wire as u64
}

// =============================================================================
// INTEGER MAGNITUDES
// =============================================================================

/// Minimal big-endian bytes of `value`; zero encodes as an empty slice.
pub fn magnitude_bytes(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

/// Parse a big-endian magnitude of at most 32 bytes.
pub fn magnitude_from_bytes(bytes: &[u8]) -> Result<U256, PoloError> {
    let significant = match bytes.iter().position(|&b| b != 0) {
        Some(start) => &bytes[start..],
        None => return Ok(U256::zero()),
    };
    if significant.len() > 32 {
        return Err(PoloError::IntegerOverflow {
            bytes: significant.len(),
        });
    }
    Ok(U256::from_big_endian(significant))
}
