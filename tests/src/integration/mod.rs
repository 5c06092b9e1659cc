//! # Integration Tests
//!
//! Each module drives the public API of one or more SDK crates the way a
//! client application would, starting from JSON where the client would.

pub mod interaction_flow;
pub mod operation_vectors;
pub mod state_paths;
