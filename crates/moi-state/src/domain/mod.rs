//! # Domain Layer
//!
//! Pure storage-key derivation and manifest path resolution. Nothing here
//! performs I/O.

pub mod accessor;
pub mod builder;
pub mod manifest;
pub mod storage_key;
pub mod type_expr;

pub use accessor::{derive, Accessor, PropertyKey};
pub use builder::{AccessorBuilder, EntityBuilder, ResolvedPath};
pub use manifest::{
    ClassDef, ElementDescriptor, LogicElement, LogicManifest, MethodField, StateDef, StateMode,
    TypeField,
};
pub use storage_key::{StorageKey, STORAGE_KEY_LENGTH};
pub use type_expr::{Primitive, TypeExpr};
