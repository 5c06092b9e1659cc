//! # Path Builder
//!
//! Resolves a path through declared state into an accessor chain. The
//! builder tracks the type currently addressed; each step checks that the
//! step is legal for that type and moves to the addressed child's type.
//!
//! ```text
//! entity("Balances")      map[address]u256
//!   .property(addr)       u256
//!
//! entity("Board")         [4]class.Person
//!   .at(1)                class.Person
//!   .field("tags")        map[string]bool
//!   .length()             u64
//! ```

use crate::domain::accessor::{derive, Accessor, PropertyKey};
use crate::domain::manifest::{ElementDescriptor, StateMode};
use crate::domain::storage_key::StorageKey;
use crate::domain::type_expr::{Primitive, TypeExpr};
use crate::errors::StateError;

/// Entry point of a path: selects a field of a state element.
#[derive(Debug, Clone, Copy)]
pub struct EntityBuilder<'a> {
    descriptor: &'a ElementDescriptor,
    mode: StateMode,
}

impl<'a> EntityBuilder<'a> {
    #[must_use]
    pub const fn new(descriptor: &'a ElementDescriptor, mode: StateMode) -> Self {
        Self { descriptor, mode }
    }

    #[must_use]
    pub const fn mode(&self) -> StateMode {
        self.mode
    }

    /// Start at the state field labelled `label`.
    pub fn entity(self, label: &str) -> Result<AccessorBuilder<'a>, StateError> {
        let (_, state) = self
            .descriptor
            .state(self.mode)
            .ok_or(StateError::StateNotPresent(self.mode))?;

        let field = state
            .field(label)
            .ok_or_else(|| StateError::UnknownStateField {
                label: label.to_string(),
                mode: self.mode,
            })?;

        Ok(AccessorBuilder {
            descriptor: self.descriptor,
            base_slot: field.slot,
            ty: TypeExpr::parse(&field.ty)?,
            accessors: Vec::new(),
        })
    }
}

/// A partially resolved path.
#[derive(Debug, Clone)]
pub struct AccessorBuilder<'a> {
    descriptor: &'a ElementDescriptor,
    base_slot: u64,
    ty: TypeExpr,
    accessors: Vec<Accessor>,
}

impl<'a> AccessorBuilder<'a> {
    /// Map entry under `key`.
    pub fn property(mut self, key: impl Into<PropertyKey>) -> Result<Self, StateError> {
        let value = match self.ty.map_types() {
            Some((_, value)) => value.clone(),
            None => return Err(StateError::NotAMap(self.ty.to_string())),
        };
        self.ty = value;
        self.accessors.push(Accessor::property(key));
        Ok(self)
    }

    /// Array element at `index`. Fixed-size arrays are bounds checked.
    pub fn at(mut self, index: u64) -> Result<Self, StateError> {
        if let TypeExpr::FixedArray(len, _) = self.ty {
            if index >= len {
                return Err(StateError::IndexOutOfBounds {
                    index,
                    ty: self.ty.to_string(),
                });
            }
        }
        let element = match self.ty.element_type() {
            Some(element) => element.clone(),
            None => return Err(StateError::NotAnArray(self.ty.to_string())),
        };
        self.ty = element;
        self.accessors.push(Accessor::ArrayIndex(index));
        Ok(self)
    }

    /// Class member labelled `name`.
    pub fn field(mut self, name: &str) -> Result<Self, StateError> {
        let descriptor = self.descriptor;
        let class = self
            .ty
            .class_name()
            .and_then(|class| descriptor.class(class))
            .ok_or_else(|| StateError::NotAClass {
                field: name.to_string(),
                ty: self.ty.to_string(),
            })?;

        let field = class.field(name).ok_or_else(|| StateError::UnknownField {
            field: name.to_string(),
            class: self.ty.to_string(),
        })?;

        let slot = field.slot;
        self.ty = TypeExpr::parse(&field.ty)?;
        self.accessors.push(Accessor::ClassField(slot));
        Ok(self)
    }

    /// Length of the addressed array or map, read as a `u64`.
    pub fn length(mut self) -> Result<Self, StateError> {
        if !self.ty.is_array() && !self.ty.is_map() {
            return Err(StateError::LengthOfScalar(self.ty.to_string()));
        }
        self.ty = TypeExpr::Primitive(Primitive::U64);
        self.accessors.push(Accessor::Length);
        Ok(self)
    }

    #[must_use]
    pub const fn base_slot(&self) -> u64 {
        self.base_slot
    }

    #[must_use]
    pub fn accessors(&self) -> &[Accessor] {
        &self.accessors
    }

    /// Type of the value at the end of the path.
    #[must_use]
    pub const fn storage_type(&self) -> &TypeExpr {
        &self.ty
    }

    #[must_use]
    pub fn storage_key(&self) -> StorageKey {
        derive(self.base_slot, &self.accessors)
    }

    /// Detach the resolved path from the manifest.
    #[must_use]
    pub fn finish(self) -> ResolvedPath {
        ResolvedPath {
            base_slot: self.base_slot,
            accessors: self.accessors,
            storage_type: self.ty,
        }
    }
}

/// Output of path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub base_slot: u64,
    pub accessors: Vec<Accessor>,
    pub storage_type: TypeExpr,
}

impl ResolvedPath {
    #[must_use]
    pub fn storage_key(&self) -> StorageKey {
        derive(self.base_slot, &self.accessors)
    }
}
