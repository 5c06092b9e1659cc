//! # Protocol Enums
//!
//! Numeric values are fixed by the network and appear on the wire.

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// OPERATION KINDS
// =============================================================================

/// Kind of an interaction operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum OpKind {
    Invalid = 0,
    ParticipantCreate = 1,
    AccountConfigure = 2,
    AssetTransfer = 3,
    FuelSupply = 4,
    AssetCreate = 5,
    AssetApprove = 6,
    AssetRevoke = 7,
    AssetMint = 8,
    AssetBurn = 9,
    AssetLockup = 10,
    AssetRelease = 11,
    LogicDeploy = 12,
    LogicInvoke = 13,
    LogicEnlist = 14,
    LogicInteract = 15,
    LogicUpgrade = 16,
}

impl OpKind {
    /// Every kind, in numeric order.
    pub const ALL: [OpKind; 17] = [
        Self::Invalid,
        Self::ParticipantCreate,
        Self::AccountConfigure,
        Self::AssetTransfer,
        Self::FuelSupply,
        Self::AssetCreate,
        Self::AssetApprove,
        Self::AssetRevoke,
        Self::AssetMint,
        Self::AssetBurn,
        Self::AssetLockup,
        Self::AssetRelease,
        Self::LogicDeploy,
        Self::LogicInvoke,
        Self::LogicEnlist,
        Self::LogicInteract,
        Self::LogicUpgrade,
    ];

    /// Wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// True for the five asset actions sharing the transfer payload.
    #[must_use]
    pub const fn is_asset_action(self) -> bool {
        matches!(
            self,
            Self::AssetTransfer
                | Self::AssetApprove
                | Self::AssetRevoke
                | Self::AssetLockup
                | Self::AssetRelease
        )
    }

    /// True for kinds that address an existing logic.
    #[must_use]
    pub const fn is_logic_action(self) -> bool {
        matches!(self, Self::LogicDeploy | Self::LogicInvoke | Self::LogicEnlist)
    }
}

impl TryFrom<u8> for OpKind {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(TypeError::UnknownVariant {
                kind: "operation kind",
                value: u64::from(value),
            })
    }
}

impl From<OpKind> for u8 {
    fn from(kind: OpKind) -> Self {
        kind.code()
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// LOCK TYPES
// =============================================================================

/// Lock a participant takes on its state during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum LockType {
    #[default]
    MutateLock = 0,
    ReadLock = 1,
    NoLock = 2,
}

impl TryFrom<u8> for LockType {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::MutateLock),
            1 => Ok(Self::ReadLock),
            2 => Ok(Self::NoLock),
            other => Err(TypeError::UnknownVariant {
                kind: "lock type",
                value: u64::from(other),
            }),
        }
    }
}

impl From<LockType> for u8 {
    fn from(lock: LockType) -> Self {
        lock as u8
    }
}

// =============================================================================
// ASSET STANDARDS
// =============================================================================

/// Asset standard declared at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
#[repr(u8)]
pub enum AssetStandard {
    #[default]
    Mas0 = 0,
    Mas1 = 1,
}

impl TryFrom<u64> for AssetStandard {
    type Error = TypeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Mas0),
            1 => Ok(Self::Mas1),
            other => Err(TypeError::UnknownVariant {
                kind: "asset standard",
                value: other,
            }),
        }
    }
}

impl From<AssetStandard> for u64 {
    fn from(standard: AssetStandard) -> Self {
        standard as u64
    }
}
