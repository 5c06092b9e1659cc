//! # Codec Errors

use thiserror::Error;

/// Errors raised while encoding or decoding POLO data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoloError {
    /// A value does not fit the schema it is being encoded with.
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A wire element cannot be decoded into the requested kind.
    #[error("incompatible wire type: expected {expected}, found {found}")]
    IncompatibleWire {
        expected: &'static str,
        found: &'static str,
    },

    /// A wire type tag outside the known range.
    #[error("unknown wire type: {0}")]
    UnknownWireType(u64),

    /// A varint ran past the end of the buffer or past 64 bits.
    #[error("malformed varint at byte {offset}")]
    MalformedVarint { offset: usize },

    /// The buffer ended before a complete element was read.
    #[error("unexpected end of buffer")]
    UnexpectedEof,

    /// A pack header is inconsistent with its body.
    #[error("invalid load: {0}")]
    InvalidLoad(String),

    /// An integer magnitude wider than 256 bits.
    #[error("integer overflow: {bytes} bytes exceed 256 bits")]
    IntegerOverflow { bytes: usize },

    /// A word element that should hold a string is not valid UTF-8.
    #[error("invalid utf-8 in string element")]
    InvalidUtf8,

    /// A map pack with an odd number of elements.
    #[error("map pack has {0} elements, expected an even count")]
    OddMapElements(usize),
}
