//! # Error Types
//!
//! Path-resolution messages name the offending label and type so callers can
//! surface them unchanged.

use crate::domain::manifest::StateMode;
use moi_polo::PoloError;
use moi_types::TypeError;
use thiserror::Error;

/// Errors raised while deriving storage keys or reading logic state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    /// A storage key input does not fit in 256 bits.
    #[error("storage key overflow: input needs {bits} bits, at most 256 allowed")]
    StorageKeyOverflow { bits: usize },

    /// `length()` applied to a type that is neither an array nor a map.
    #[error("Attempting to access the length of a non-array or non-map type '{0}'.")]
    LengthOfScalar(String),

    /// `property()` applied to a type that is not a map.
    #[error("Attempting to access a property of '{0}', which is not a map type.")]
    NotAMap(String),

    /// `at()` applied to a type that is not an array.
    #[error("Attempting to index into '{0}', which is not an array type.")]
    NotAnArray(String),

    /// Index past the end of a fixed-size array.
    #[error("index {index} is out of bounds for '{ty}'")]
    IndexOutOfBounds { index: u64, ty: String },

    /// `field()` applied to a type that is not a declared class.
    #[error("Attempting to access a field '{field}' in {ty}, which is not a recognized class.")]
    NotAClass { field: String, ty: String },

    /// `field()` named a member the class does not declare.
    #[error("The field '{field}' is not a recognized member of the class '{class}'.")]
    UnknownField { field: String, class: String },

    /// `entity()` named a label the state element does not declare.
    #[error("'{label}' is not a member of {mode} state")]
    UnknownStateField { label: String, mode: StateMode },

    /// The manifest declares no state element of the requested mode.
    #[error("{0} state is not present")]
    StateNotPresent(StateMode),

    /// A type expression could not be parsed.
    #[error("invalid type expression '{input}' at position {position}: {reason}")]
    TypeParse {
        input: String,
        position: usize,
        reason: String,
    },

    /// A class referenced by a type is not declared in the manifest.
    #[error("Invalid class name: {0}")]
    UnknownClass(String),

    /// A class contains itself through its fields.
    #[error("class '{0}' is recursive and has no finite schema")]
    RecursiveClass(String),

    /// The manifest could not be read.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// Identifier or hex conversion failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Stored bytes could not be decoded.
    #[error(transparent)]
    Codec(#[from] PoloError),

    /// The storage reader reported a failure.
    #[error("storage reader error: {0}")]
    Reader(String),
}
