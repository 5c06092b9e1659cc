//! # Operations
//!
//! Caller-facing operation payloads. Byte fields are `0x` hex strings and
//! most fields are optional so validators can name what is missing; the
//! registry converts them to wire primitives.
//!
//! On the JSON boundary an operation is `{"type": <kind>, "payload": {...}}`
//! ([`RawOperation`]). [`Operation`] is the closed set of registered kinds.

use crate::errors::IxError;
use moi_types::OpKind;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// PAYLOADS
// =============================================================================

/// Key added to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAddPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_algorithm: Option<u64>,
}

/// Key removed from an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRevokePayload {
    pub key_id: u64,
}

/// Create a new participant account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantCreatePayload {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub keys_payload: Vec<KeyAddPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u128>,
}

/// Add or revoke account keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfigurePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<KeyAddPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoke: Option<Vec<KeyRevokePayload>>,
}

/// Logic attached to a logical asset at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLogicPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callsite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calldata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<BTreeMap<String, String>>,
}

/// Create a new asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCreatePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_stateful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_logical: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_payload: Option<AssetLogicPayload>,
}

/// Mint or burn supply of an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSupplyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u128>,
}

/// Transfer, approve, revoke, lock up or release an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetActionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefactor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Deploy, invoke or enlist with a logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicActionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callsite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calldata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<BTreeMap<String, String>>,
}

// =============================================================================
// OPERATION
// =============================================================================

/// An operation of a registered kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawOperation")]
pub enum Operation {
    ParticipantCreate(ParticipantCreatePayload),
    AccountConfigure(AccountConfigurePayload),
    AssetCreate(AssetCreatePayload),
    AssetMint(AssetSupplyPayload),
    AssetBurn(AssetSupplyPayload),
    AssetTransfer(AssetActionPayload),
    AssetApprove(AssetActionPayload),
    AssetRevoke(AssetActionPayload),
    AssetLockup(AssetActionPayload),
    AssetRelease(AssetActionPayload),
    LogicDeploy(LogicActionPayload),
    LogicInvoke(LogicActionPayload),
    LogicEnlist(LogicActionPayload),
}

impl Operation {
    /// Kind of this operation.
    #[must_use]
    pub const fn kind(&self) -> OpKind {
        match self {
            Self::ParticipantCreate(_) => OpKind::ParticipantCreate,
            Self::AccountConfigure(_) => OpKind::AccountConfigure,
            Self::AssetCreate(_) => OpKind::AssetCreate,
            Self::AssetMint(_) => OpKind::AssetMint,
            Self::AssetBurn(_) => OpKind::AssetBurn,
            Self::AssetTransfer(_) => OpKind::AssetTransfer,
            Self::AssetApprove(_) => OpKind::AssetApprove,
            Self::AssetRevoke(_) => OpKind::AssetRevoke,
            Self::AssetLockup(_) => OpKind::AssetLockup,
            Self::AssetRelease(_) => OpKind::AssetRelease,
            Self::LogicDeploy(_) => OpKind::LogicDeploy,
            Self::LogicInvoke(_) => OpKind::LogicInvoke,
            Self::LogicEnlist(_) => OpKind::LogicEnlist,
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Operation", 2)?;
        state.serialize_field("type", &self.kind())?;
        match self {
            Self::ParticipantCreate(p) => state.serialize_field("payload", p)?,
            Self::AccountConfigure(p) => state.serialize_field("payload", p)?,
            Self::AssetCreate(p) => state.serialize_field("payload", p)?,
            Self::AssetMint(p) | Self::AssetBurn(p) => state.serialize_field("payload", p)?,
            Self::AssetTransfer(p)
            | Self::AssetApprove(p)
            | Self::AssetRevoke(p)
            | Self::AssetLockup(p)
            | Self::AssetRelease(p) => state.serialize_field("payload", p)?,
            Self::LogicDeploy(p) | Self::LogicInvoke(p) | Self::LogicEnlist(p) => {
                state.serialize_field("payload", p)?
            }
        }
        state.end()
    }
}

/// Untyped operation as it appears on the JSON boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOperation {
    #[serde(rename = "type")]
    pub kind: OpKind,
    #[serde(default)]
    pub payload: Value,
}

fn payload<T: serde::de::DeserializeOwned>(kind: OpKind, payload: Value) -> Result<T, IxError> {
    let payload = if payload.is_null() {
        Value::Object(Default::default())
    } else {
        payload
    };
    serde_json::from_value(payload).map_err(|e| IxError::MalformedPayload {
        kind,
        reason: e.to_string(),
    })
}

impl TryFrom<RawOperation> for Operation {
    type Error = IxError;

    fn try_from(raw: RawOperation) -> Result<Self, Self::Error> {
        let RawOperation { kind, payload: body } = raw;
        Ok(match kind {
            OpKind::ParticipantCreate => Self::ParticipantCreate(payload(kind, body)?),
            OpKind::AccountConfigure => Self::AccountConfigure(payload(kind, body)?),
            OpKind::AssetCreate => Self::AssetCreate(payload(kind, body)?),
            OpKind::AssetMint => Self::AssetMint(payload(kind, body)?),
            OpKind::AssetBurn => Self::AssetBurn(payload(kind, body)?),
            OpKind::AssetTransfer => Self::AssetTransfer(payload(kind, body)?),
            OpKind::AssetApprove => Self::AssetApprove(payload(kind, body)?),
            OpKind::AssetRevoke => Self::AssetRevoke(payload(kind, body)?),
            OpKind::AssetLockup => Self::AssetLockup(payload(kind, body)?),
            OpKind::AssetRelease => Self::AssetRelease(payload(kind, body)?),
            OpKind::LogicDeploy => Self::LogicDeploy(payload(kind, body)?),
            OpKind::LogicInvoke => Self::LogicInvoke(payload(kind, body)?),
            OpKind::LogicEnlist => Self::LogicEnlist(payload(kind, body)?),
            OpKind::Invalid | OpKind::FuelSupply | OpKind::LogicInteract | OpKind::LogicUpgrade => {
                return Err(IxError::UnregisteredOperationKind(kind))
            }
        })
    }
}

impl TryFrom<&Operation> for RawOperation {
    type Error = serde_json::Error;

    fn try_from(operation: &Operation) -> Result<Self, Self::Error> {
        serde_json::to_value(operation).and_then(serde_json::from_value)
    }
}
