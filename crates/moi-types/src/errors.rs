//! # Error Types

use thiserror::Error;

/// Errors raised while parsing identifiers, hex strings and enum values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Input is not a `0x`-prefixed hex string.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Decoded identifier has the wrong number of bytes.
    #[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// Numeric value outside a protocol enum.
    #[error("unknown {kind} value: {value}")]
    UnknownVariant { kind: &'static str, value: u64 },
}
