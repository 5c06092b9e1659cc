//! # Logic Manifest Metadata
//!
//! Only the parts of a manifest that state reading needs are modelled
//! strictly: state elements and class elements. Every other element kind is
//! kept as opaque JSON.

use crate::errors::StateError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Element kind for state declarations.
pub const STATE_ELEMENT: &str = "state";
/// Element kind for class declarations.
pub const CLASS_ELEMENT: &str = "class";
/// Prefix that turns a class name into a type expression.
pub const CLASS_PREFIX: &str = "class.";

/// A logic manifest as published with a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Value>,
    pub elements: Vec<LogicElement>,
}

impl LogicManifest {
    /// Parse the JSON form of a manifest.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        serde_json::from_str(json).map_err(|e| StateError::InvalidManifest(e.to_string()))
    }
}

/// One manifest element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicElement {
    pub ptr: u64,
    pub kind: String,
    #[serde(default)]
    pub deps: Vec<u64>,
    pub data: Value,
}

/// Lifetime of a state element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMode {
    /// Logic-wide storage.
    Persistent,
    /// Per-participant storage.
    Ephemeral,
}

impl fmt::Display for StateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistent => write!(f, "persistent"),
            Self::Ephemeral => write!(f, "ephemeral"),
        }
    }
}

/// A typed member of a state or class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    pub slot: u64,
    pub label: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Data of a `state` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDef {
    pub mode: StateMode,
    #[serde(default)]
    pub fields: Vec<TypeField>,
}

impl StateDef {
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&TypeField> {
        self.fields.iter().find(|f| f.label == label)
    }
}

/// Method reference inside a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodField {
    pub ptr: u64,
    pub code: u64,
}

/// Data of a `class` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<TypeField>,
    #[serde(default)]
    pub methods: Vec<MethodField>,
}

impl ClassDef {
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&TypeField> {
        self.fields.iter().find(|f| f.label == label)
    }
}

/// Index over a manifest's elements.
///
/// Classes are keyed by their type expression (`class.<Name>`), states by
/// mode. Built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ElementDescriptor {
    elements: BTreeMap<u64, LogicElement>,
    classes: HashMap<String, ClassDef>,
    states: HashMap<StateMode, (u64, StateDef)>,
}

impl ElementDescriptor {
    /// Index `elements`, parsing state and class data.
    pub fn new(elements: Vec<LogicElement>) -> Result<Self, StateError> {
        let mut descriptor = Self::default();

        for element in elements {
            match element.kind.as_str() {
                STATE_ELEMENT => {
                    let state: StateDef = parse_data(&element)?;
                    descriptor.states.insert(state.mode, (element.ptr, state));
                }
                CLASS_ELEMENT => {
                    let class: ClassDef = parse_data(&element)?;
                    descriptor
                        .classes
                        .insert(format!("{CLASS_PREFIX}{}", class.name), class);
                }
                _ => {}
            }
            descriptor.elements.insert(element.ptr, element);
        }

        Ok(descriptor)
    }

    pub fn from_manifest(manifest: &LogicManifest) -> Result<Self, StateError> {
        Self::new(manifest.elements.clone())
    }

    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let manifest = LogicManifest::from_json(json)?;
        Self::new(manifest.elements)
    }

    #[must_use]
    pub fn element(&self, ptr: u64) -> Option<&LogicElement> {
        self.elements.get(&ptr)
    }

    pub fn elements(&self) -> impl Iterator<Item = &LogicElement> {
        self.elements.values()
    }

    /// Class by type expression, e.g. `class.Person`.
    #[must_use]
    pub fn class(&self, ty: &str) -> Option<&ClassDef> {
        self.classes.get(ty)
    }

    #[must_use]
    pub fn has_class(&self, ty: &str) -> bool {
        self.classes.contains_key(ty)
    }

    /// State element of `mode` and its pointer.
    #[must_use]
    pub fn state(&self, mode: StateMode) -> Option<(u64, &StateDef)> {
        self.states.get(&mode).map(|(ptr, state)| (*ptr, state))
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.states.contains_key(&StateMode::Persistent)
    }

    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.states.contains_key(&StateMode::Ephemeral)
    }
}

fn parse_data<T: DeserializeOwned>(element: &LogicElement) -> Result<T, StateError> {
    serde_json::from_value(element.data.clone()).map_err(|e| {
        StateError::InvalidManifest(format!("element {} ({}): {e}", element.ptr, element.kind))
    })
}
