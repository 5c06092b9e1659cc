//! # Operation Registry
//!
//! Static table of one [`OperationDescriptor`] per registered [`OpKind`].
//! A descriptor supplies the payload's wire schema, its validator and the
//! transform from caller-facing fields to wire primitives.
//!
//! | Kinds | Schema | Notes |
//! |-------|--------|-------|
//! | ParticipantCreate | `{address, keys_payload, amount}` | |
//! | AccountConfigure | `{add, revoke}` | |
//! | AssetCreate | `{symbol, supply, standard, dimension, is_stateful, is_logical, logic_payload}` | |
//! | AssetMint, AssetBurn | `{asset_id, amount}` | asset id travels as hex text |
//! | AssetTransfer .. AssetRelease | `{benefactor, beneficiary, asset_id, amount, timestamp}` | absent benefactor is 32 zero bytes |
//! | LogicDeploy, LogicInvoke, LogicEnlist | `{manifest, logic_id, callsite, calldata, interfaces}` | logic id travels as raw bytes |
//!
//! The table is built once and only read afterwards.

use crate::domain::operations::{
    AccountConfigurePayload, AssetActionPayload, AssetCreatePayload, AssetLogicPayload,
    AssetSupplyPayload, KeyAddPayload, LogicActionPayload, Operation, ParticipantCreatePayload,
};
use crate::domain::validation::ValidationIssue;
use crate::errors::IxError;
use lazy_static::lazy_static;
use moi_polo::{PoloSchema, PoloValue};
use moi_types::hex::{hex_to_bytes, is_hex};
use moi_types::{AssetId, AssetStandard, LogicId, OpKind, IDENTIFIER_LENGTH};
use serde::Serialize;
use std::collections::BTreeMap;

lazy_static! {
    static ref REGISTRY: OperationRegistry = OperationRegistry::build();
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Per-kind encoding rules.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    kind: OpKind,
    schema: PoloSchema,
}

impl OperationDescriptor {
    /// Kind this descriptor handles.
    #[must_use]
    pub const fn kind(&self) -> OpKind {
        self.kind
    }

    /// Wire schema of the payload.
    #[must_use]
    pub const fn schema(&self) -> &PoloSchema {
        &self.schema
    }

    /// First violation in the untransformed payload, if any.
    pub fn validate(&self, operation: &Operation) -> Option<ValidationIssue> {
        if operation.kind() != self.kind {
            return Some(
                ValidationIssue::new("type", format!("Expected a {} operation", self.kind))
                    .with_value(operation.kind()),
            );
        }

        let result = match operation {
            Operation::ParticipantCreate(p) => check_participant_create(p),
            Operation::AccountConfigure(p) => check_account_configure(p),
            Operation::AssetCreate(p) => check_asset_create(p),
            Operation::AssetMint(p) | Operation::AssetBurn(p) => check_asset_supply(p),
            Operation::AssetTransfer(p)
            | Operation::AssetApprove(p)
            | Operation::AssetRevoke(p)
            | Operation::AssetLockup(p)
            | Operation::AssetRelease(p) => check_asset_action(self.kind, p),
            Operation::LogicDeploy(p) | Operation::LogicInvoke(p) | Operation::LogicEnlist(p) => {
                check_logic_action(self.kind, p)
            }
        };
        result.err()
    }

    /// Convert caller-facing fields into the value encoded with [`Self::schema`].
    pub fn transform(&self, operation: &Operation) -> Result<PoloValue, IxError> {
        if operation.kind() != self.kind {
            return Err(IxError::UnregisteredOperationKind(operation.kind()));
        }

        match operation {
            Operation::ParticipantCreate(p) => participant_create_value(p),
            Operation::AccountConfigure(p) => account_configure_value(p),
            Operation::AssetCreate(p) => asset_create_value(p),
            Operation::AssetMint(p) | Operation::AssetBurn(p) => asset_supply_value(p),
            Operation::AssetTransfer(p)
            | Operation::AssetApprove(p)
            | Operation::AssetRevoke(p)
            | Operation::AssetLockup(p)
            | Operation::AssetRelease(p) => asset_action_value(p),
            Operation::LogicDeploy(p) | Operation::LogicInvoke(p) | Operation::LogicEnlist(p) => {
                logic_action_value(p)
            }
        }
    }
}

/// Lookup table from kind to descriptor.
#[derive(Debug)]
pub struct OperationRegistry {
    descriptors: Vec<OperationDescriptor>,
}

impl OperationRegistry {
    fn build() -> Self {
        let descriptors = OpKind::ALL
            .iter()
            .filter_map(|kind| schema_for(*kind).map(|schema| OperationDescriptor { kind: *kind, schema }))
            .collect();
        Self { descriptors }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        &*REGISTRY
    }

    /// Every registered descriptor, in kind order.
    pub fn list(&self) -> &[OperationDescriptor] {
        &self.descriptors
    }

    /// Descriptor for `kind`.
    pub fn descriptor(&self, kind: OpKind) -> Result<&OperationDescriptor, IxError> {
        self.descriptors
            .iter()
            .find(|d| d.kind == kind)
            .ok_or(IxError::UnregisteredOperationKind(kind))
    }

    /// True if `kind` has a descriptor.
    pub fn is_registered(&self, kind: OpKind) -> bool {
        self.descriptor(kind).is_ok()
    }

    /// Validate `operation` with its kind's descriptor.
    pub fn validate(&self, operation: &Operation) -> Result<Option<ValidationIssue>, IxError> {
        Ok(self.descriptor(operation.kind())?.validate(operation))
    }
}

// =============================================================================
// SCHEMAS
// =============================================================================

fn key_add_schema() -> PoloSchema {
    PoloSchema::structure([
        ("public_key", PoloSchema::Bytes),
        ("weight", PoloSchema::Integer),
        ("signature_algorithm", PoloSchema::Integer),
    ])
}

fn interface_schema() -> PoloSchema {
    PoloSchema::map(PoloSchema::String, PoloSchema::String)
}

fn schema_for(kind: OpKind) -> Option<PoloSchema> {
    let schema = match kind {
        OpKind::ParticipantCreate => PoloSchema::structure([
            ("address", PoloSchema::Bytes),
            ("keys_payload", PoloSchema::array(key_add_schema())),
            ("amount", PoloSchema::Integer),
        ]),
        OpKind::AccountConfigure => PoloSchema::structure([
            ("add", PoloSchema::array(key_add_schema())),
            (
                "revoke",
                PoloSchema::array(PoloSchema::structure([("key_id", PoloSchema::Integer)])),
            ),
        ]),
        OpKind::AssetCreate => PoloSchema::structure([
            ("symbol", PoloSchema::String),
            ("supply", PoloSchema::Integer),
            ("standard", PoloSchema::Integer),
            ("dimension", PoloSchema::Integer),
            ("is_stateful", PoloSchema::Bool),
            ("is_logical", PoloSchema::Bool),
            (
                "logic_payload",
                PoloSchema::structure([
                    ("manifest", PoloSchema::Bytes),
                    ("logic_id", PoloSchema::String),
                    ("callsite", PoloSchema::String),
                    ("calldata", PoloSchema::Bytes),
                    ("interface", interface_schema()),
                ]),
            ),
        ]),
        OpKind::AssetMint | OpKind::AssetBurn => PoloSchema::structure([
            ("asset_id", PoloSchema::String),
            ("amount", PoloSchema::Integer),
        ]),
        OpKind::AssetTransfer
        | OpKind::AssetApprove
        | OpKind::AssetRevoke
        | OpKind::AssetLockup
        | OpKind::AssetRelease => PoloSchema::structure([
            ("benefactor", PoloSchema::Bytes),
            ("beneficiary", PoloSchema::Bytes),
            ("asset_id", PoloSchema::String),
            ("amount", PoloSchema::Integer),
            ("timestamp", PoloSchema::Integer),
        ]),
        OpKind::LogicDeploy | OpKind::LogicInvoke | OpKind::LogicEnlist => PoloSchema::structure([
            ("manifest", PoloSchema::Bytes),
            ("logic_id", PoloSchema::Bytes),
            ("callsite", PoloSchema::String),
            ("calldata", PoloSchema::Bytes),
            ("interfaces", interface_schema()),
        ]),
        OpKind::Invalid | OpKind::FuelSupply | OpKind::LogicInteract | OpKind::LogicUpgrade => {
            return None
        }
    };
    Some(schema)
}

// =============================================================================
// VALIDATORS
// =============================================================================

type Check = Result<(), ValidationIssue>;

fn issue<T: Serialize>(field: &str, message: &str, value: T) -> ValidationIssue {
    ValidationIssue::new(field, message).with_value(value)
}

fn required<T: Serialize>(value: &Option<T>, field: &str, message: &str) -> Check {
    match value {
        Some(_) => Ok(()),
        None => Err(issue(field, message, value)),
    }
}

fn identifier(value: &Option<String>, field: &str, message: &str) -> Check {
    match value {
        Some(v) if is_hex(v, Some(IDENTIFIER_LENGTH)) => Ok(()),
        other => Err(issue(field, message, other)),
    }
}

fn optional_hex(value: &Option<String>, field: &str, message: &str) -> Check {
    match value {
        Some(v) if !is_hex(v, None) => Err(issue(field, message, v)),
        _ => Ok(()),
    }
}

fn non_empty(value: &Option<String>, field: &str, message: &str) -> Check {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        other => Err(issue(field, message, other)),
    }
}

fn check_keys(keys: &[KeyAddPayload], parent: &str) -> Check {
    for (index, key) in keys.iter().enumerate() {
        optional_hex(&key.public_key, "public_key", "Public key must be a hex string")
            .map_err(|e| e.prefixed(&format!("{parent}[{index}]")))?;
    }
    Ok(())
}

fn check_participant_create(p: &ParticipantCreatePayload) -> Check {
    identifier(&p.address, "address", "Invalid identifier")?;
    check_keys(&p.keys_payload, "keys_payload")?;
    required(&p.amount, "amount", "Amount is required")
}

fn check_account_configure(p: &AccountConfigurePayload) -> Check {
    if p.add.is_none() && p.revoke.is_none() {
        return Err(ValidationIssue::new("add", "Add or revoke is required"));
    }
    if let Some(add) = &p.add {
        if add.is_empty() {
            return Err(issue("add", "At least one value is required in add", add));
        }
        check_keys(add, "add")?;
    }
    if let Some(revoke) = &p.revoke {
        if revoke.is_empty() {
            return Err(issue("revoke", "At least one value is required in revoke", revoke));
        }
    }
    Ok(())
}

fn check_asset_create(p: &AssetCreatePayload) -> Check {
    required(&p.supply, "supply", "Supply is required")?;
    match p.standard {
        None => return Err(issue("standard", "Asset standard is required", p.standard)),
        Some(standard) if AssetStandard::try_from(standard).is_err() => {
            return Err(issue("standard", "Invalid asset standard", standard))
        }
        Some(_) => {}
    }
    if let Some(logic) = &p.logic_payload {
        check_asset_logic(logic).map_err(|e| e.prefixed("logic_payload"))?;
    }
    Ok(())
}

fn check_asset_logic(p: &AssetLogicPayload) -> Check {
    optional_hex(&p.manifest, "manifest", "Manifest must be a hex string")?;
    optional_hex(&p.calldata, "calldata", "Calldata must be a hex string")
}

fn asset_id(value: &Option<String>) -> Check {
    match value {
        None => Err(issue("asset_id", "Asset ID is required", value)),
        Some(v) if AssetId::from_hex(v).is_err() => Err(issue("asset_id", "Invalid asset ID", v)),
        Some(_) => Ok(()),
    }
}

fn check_asset_supply(p: &AssetSupplyPayload) -> Check {
    required(&p.amount, "amount", "Amount is required")?;
    asset_id(&p.asset_id)
}

fn check_asset_action(kind: OpKind, p: &AssetActionPayload) -> Check {
    asset_id(&p.asset_id)?;
    identifier(&p.beneficiary, "beneficiary", "Invalid beneficiary address")?;
    if p.benefactor.is_some() {
        identifier(&p.benefactor, "benefactor", "Invalid benefactor address")?;
    }

    match kind {
        OpKind::AssetTransfer | OpKind::AssetLockup => {
            required(&p.amount, "amount", "Amount is required")
        }
        OpKind::AssetApprove => {
            required(&p.amount, "amount", "Amount is required")?;
            required(&p.timestamp, "timestamp", "Timestamp is required for approve operation")
        }
        OpKind::AssetRelease => {
            required(&p.amount, "amount", "Amount is required")?;
            required(&p.benefactor, "benefactor", "Benefactor is required for release operation")
        }
        _ => Ok(()),
    }
}

fn check_logic_action(kind: OpKind, p: &LogicActionPayload) -> Check {
    non_empty(&p.callsite, "callsite", "Callsite is required")?;

    if kind == OpKind::LogicDeploy {
        non_empty(&p.manifest, "manifest", "Manifest is required")?;
        optional_hex(&p.manifest, "manifest", "Manifest must be a hex string")?;
    } else {
        match &p.logic_id {
            None => return Err(issue("logic_id", "Logic ID is required", &p.logic_id)),
            Some(id) if LogicId::from_hex(id).is_err() => {
                return Err(issue("logic_id", "Invalid logic ID", id))
            }
            Some(_) => {}
        }
    }

    optional_hex(&p.calldata, "calldata", "Calldata must be a hex string")
}

// =============================================================================
// TRANSFORMS
// =============================================================================

fn bytes_of(value: &Option<String>) -> Result<Option<Vec<u8>>, IxError> {
    value.as_deref().map(hex_to_bytes).transpose().map_err(IxError::from)
}

fn interface_value(map: &Option<BTreeMap<String, String>>) -> Option<PoloValue> {
    map.as_ref().map(|entries| {
        PoloValue::Map(
            entries
                .iter()
                .map(|(k, v)| (PoloValue::from(k.as_str()), PoloValue::from(v.as_str())))
                .collect(),
        )
    })
}

fn key_add_value(key: &KeyAddPayload) -> Result<PoloValue, IxError> {
    Ok(PoloValue::structure()
        .with_opt("public_key", bytes_of(&key.public_key)?)
        .with_opt("weight", key.weight)
        .with_opt("signature_algorithm", key.signature_algorithm))
}

fn key_list(keys: &[KeyAddPayload]) -> Result<PoloValue, IxError> {
    Ok(PoloValue::List(keys.iter().map(key_add_value).collect::<Result<_, _>>()?))
}

fn participant_create_value(p: &ParticipantCreatePayload) -> Result<PoloValue, IxError> {
    Ok(PoloValue::structure()
        .with_opt("address", bytes_of(&p.address)?)
        .with("keys_payload", key_list(&p.keys_payload)?)
        .with_opt("amount", p.amount))
}

fn account_configure_value(p: &AccountConfigurePayload) -> Result<PoloValue, IxError> {
    let add = p.add.as_deref().map(key_list).transpose()?;
    let revoke = p.revoke.as_ref().map(|keys| {
        PoloValue::List(
            keys.iter()
                .map(|k| PoloValue::structure().with("key_id", k.key_id))
                .collect(),
        )
    });
    Ok(PoloValue::structure().with_opt("add", add).with_opt("revoke", revoke))
}

fn asset_create_value(p: &AssetCreatePayload) -> Result<PoloValue, IxError> {
    let logic = match &p.logic_payload {
        Some(logic) => Some(
            PoloValue::structure()
                .with_opt("manifest", bytes_of(&logic.manifest)?)
                .with_opt("logic_id", logic.logic_id.clone())
                .with_opt("callsite", logic.callsite.clone())
                .with_opt("calldata", bytes_of(&logic.calldata)?)
                .with_opt("interface", interface_value(&logic.interface)),
        ),
        None => None,
    };

    Ok(PoloValue::structure()
        .with_opt("symbol", p.symbol.clone())
        .with_opt("supply", p.supply)
        .with_opt("standard", p.standard)
        .with_opt("dimension", p.dimension)
        .with_opt("is_stateful", p.is_stateful)
        .with_opt("is_logical", p.is_logical)
        .with_opt("logic_payload", logic))
}

fn canonical_asset_id(value: &Option<String>) -> Result<Option<String>, IxError> {
    Ok(value
        .as_deref()
        .map(AssetId::from_hex)
        .transpose()?
        .map(|id| id.to_hex()))
}

fn asset_supply_value(p: &AssetSupplyPayload) -> Result<PoloValue, IxError> {
    Ok(PoloValue::structure()
        .with_opt("asset_id", canonical_asset_id(&p.asset_id)?)
        .with_opt("amount", p.amount))
}

fn asset_action_value(p: &AssetActionPayload) -> Result<PoloValue, IxError> {
    let benefactor = bytes_of(&p.benefactor)?.unwrap_or_else(|| vec![0u8; IDENTIFIER_LENGTH]);

    Ok(PoloValue::structure()
        .with("benefactor", benefactor)
        .with_opt("beneficiary", bytes_of(&p.beneficiary)?)
        .with_opt("asset_id", canonical_asset_id(&p.asset_id)?)
        .with_opt("amount", p.amount)
        .with_opt("timestamp", p.timestamp))
}

fn logic_action_value(p: &LogicActionPayload) -> Result<PoloValue, IxError> {
    let logic_id = p
        .logic_id
        .as_deref()
        .map(LogicId::from_hex)
        .transpose()?
        .map(|id| id.as_bytes().to_vec());

    Ok(PoloValue::structure()
        .with_opt("manifest", bytes_of(&p.manifest)?)
        .with_opt("logic_id", logic_id)
        .with_opt("callsite", p.callsite.clone())
        .with_opt("calldata", bytes_of(&p.calldata)?)
        .with_opt("interfaces", interface_value(&p.interfaces)))
}
