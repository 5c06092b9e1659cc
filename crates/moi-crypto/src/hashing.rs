//! # BLAKE2b-256 Hashing
//!
//! The node derives every storage slot with unkeyed BLAKE2b truncated to a
//! 32-byte digest. Both the storage-key engine and the map-key hashing in
//! property accessors go through [`sum256`].

use crate::errors::CryptoError;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Digest width in bytes.
pub const HASH_LENGTH: usize = 32;

/// BLAKE2b hash output (256-bit).
pub type Hash = [u8; HASH_LENGTH];

type Blake2b256 = Blake2b<U32>;

/// Stateful BLAKE2b-256 hasher.
#[derive(Clone, Default)]
pub struct Blake2bHasher {
    inner: Blake2b256,
}

impl Blake2bHasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Blake2b256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        Digest::update(&mut self.inner, data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

/// Hash data with BLAKE2b-256 (one-shot).
pub fn sum256(data: &[u8]) -> Hash {
    Blake2b256::digest(data).into()
}

/// Hash the concatenation of multiple inputs.
pub fn sum256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Blake2bHasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}

/// Interpret a slice as a digest, checking its width.
pub fn hash_from_slice(slice: &[u8]) -> Result<Hash, CryptoError> {
    slice
        .try_into()
        .map_err(|_| CryptoError::InvalidDigestLength {
            expected: HASH_LENGTH,
            actual: slice.len(),
        })
}
