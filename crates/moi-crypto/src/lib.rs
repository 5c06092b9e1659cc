//! # MOI Crypto - Hash Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | BLAKE2b-256 | Storage slot derivation, map key hashing |
//!
//! ## Determinism
//!
//! The digest width (32 bytes) and byte order are part of the wire contract
//! with the node: storage keys derived here must match the slots the node
//! writes to, bit for bit.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sum256, sum256_many, Blake2bHasher, Hash, HASH_LENGTH};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
