//! # MOI POLO - Wire Codec
//!
//! Schema-driven binary codec shared by the operation codec, the interaction
//! assembler and the storage-key engine. Output is deterministic: identical
//! values and schemas always produce identical bytes.
//!
//! ## Layout
//!
//! ```text
//! element  = varint(wire) || data                      (top level)
//! pack     = LOAD(head, body)
//! LOAD     = varint(len(head) << 4 | 15) || head || body
//! head     = varint(offset << 4 | wire) per element
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `wire` | Wire types, varints, integer magnitudes |
//! | `value` | Dynamic value tree ([`PoloValue`], [`Integer`]) |
//! | `schema` | Schema AST ([`PoloSchema`]) |
//! | `encoder` | [`Polorizer`] |
//! | `decoder` | [`Depolorizer`] |

#![warn(clippy::all)]

pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod schema;
pub mod value;
pub mod wire;

pub use decoder::{depolorize, Depolorizer, ReadBuffer};
pub use encoder::{polorize, Polorizer};
pub use errors::PoloError;
pub use schema::PoloSchema;
pub use value::{Integer, PoloValue};
pub use wire::WireType;
