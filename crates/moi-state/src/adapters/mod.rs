//! # Adapters
//!
//! - [`InMemoryStorage`]: a [`StorageReader`](crate::ports::StorageReader)
//!   backed by a hash map, for tests and offline tooling.

pub mod memory;

pub use memory::InMemoryStorage;
