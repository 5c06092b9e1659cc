//! # MOI State
//!
//! Storage-key derivation for logic state, path resolution against a logic
//! manifest, and readers that fetch and decode state slots.
//!
//! ## Key Derivation
//!
//! ```text
//! base slot ──Property(k)──▶ sum256(key || "." || sum256(polo(k)))
//!           ──ArrayIndex(i)─▶ sum256(key) + i
//!           ──ClassField(s)─▶ sum256(key) + s
//!           ──Length────────▶ key
//! ```
//!
//! Keys are 32 big-endian bytes and must match the node's slot layout
//! exactly.
//!
//! ## Module Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | `domain` | [`StorageKey`], [`Accessor`], [`TypeExpr`], manifest model, path builder |
//! | `ports` | [`StorageReader`] |
//! | `adapters` | [`InMemoryStorage`] |
//! | `service` | [`PersistentState`], [`EphemeralState`] |

#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::InMemoryStorage;
pub use domain::*;
pub use errors::StateError;
pub use ports::StorageReader;
pub use service::{EphemeralState, PersistentState};
