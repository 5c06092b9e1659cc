//! # Ports
//!
//! - **Driven (Outbound)**: [`InteractionTransport`] submits encoded
//!   interactions to a node.

pub mod outbound;

pub use outbound::*;
