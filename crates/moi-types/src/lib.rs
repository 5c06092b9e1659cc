//! # MOI Types
//!
//! Value types shared across the SDK core.
//!
//! ## Contents
//!
//! - **Hex**: `0x`-prefixed hex validation and conversion
//! - **Identifiers**: [`ParticipantId`], [`AssetId`], [`LogicId`]
//! - **Enums**: [`OpKind`], [`LockType`], [`AssetStandard`]

pub mod enums;
pub mod errors;
pub mod hex;
pub mod identifiers;

pub use enums::{AssetStandard, LockType, OpKind};
pub use errors::TypeError;
pub use identifiers::{AssetId, IdentifierKind, LogicId, ParticipantId, IDENTIFIER_LENGTH};
