//! # Hex Helpers
//!
//! Caller-facing byte fields are `0x`-prefixed hex strings. A bare `0x` is
//! not considered hex.

use crate::errors::TypeError;

/// True if `value` is `0x` followed by at least one hex digit.
///
/// With `byte_length`, the digit count must be exactly twice that length.
pub fn is_hex(value: &str, byte_length: Option<usize>) -> bool {
    let Some(digits) = value.strip_prefix("0x") else {
        return false;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    byte_length.map_or(true, |len| digits.len() == len * 2)
}

/// Strip a leading `0x`, if any.
pub fn trim_hex_prefix(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

/// Decode a hex string with or without the `0x` prefix.
///
/// Odd digit counts are left-padded with a zero nibble.
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>, TypeError> {
    let digits = trim_hex_prefix(value);
    let decoded = if digits.len() % 2 == 1 {
        ::hex::decode(format!("0{digits}"))
    } else {
        ::hex::decode(digits)
    };
    decoded.map_err(|_| TypeError::InvalidHex(value.to_string()))
}

/// Encode bytes as lowercase `0x`-prefixed hex.
pub fn bytes_to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", ::hex::encode(bytes))
}
