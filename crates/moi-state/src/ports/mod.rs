//! # Ports
//!
//! - **Driven (Outbound)**: [`StorageReader`] fetches raw slot contents from
//!   a node.

pub mod outbound;

pub use outbound::*;
