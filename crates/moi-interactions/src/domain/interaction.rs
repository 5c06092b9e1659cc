//! # Interaction Requests
//!
//! Caller-facing interaction shape and its request-level validation.
//! Operation payloads are validated through the registry and reported with
//! an `operations[i].` prefix.

use crate::domain::operations::Operation;
use crate::domain::registry::OperationRegistry;
use crate::domain::validation::ValidationIssue;
use moi_types::hex::is_hex;
use moi_types::{LockType, IDENTIFIER_LENGTH};
use serde::{Deserialize, Serialize};

/// Account sending or sponsoring an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub address: String,
    #[serde(default)]
    pub sequence_id: u64,
    #[serde(default)]
    pub key_id: u64,
}

impl Sender {
    /// Sender at `address` with zero sequence and key id.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }
}

/// Participant supplied explicitly by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IxParticipant {
    #[serde(alias = "address")]
    pub id: String,
    #[serde(default)]
    pub lock_type: LockType,
    #[serde(default)]
    pub notary: bool,
}

/// Consensus preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IxConsensusPreference {
    #[serde(default)]
    pub mtq: u64,
    #[serde(default)]
    pub trust_nodes: Vec<String>,
}

/// Compute and consensus preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IxPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus: Option<IxConsensusPreference>,
}

/// An interaction as built by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Sender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<Sender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_limit: Option<u64>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<IxParticipant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<IxPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perception: Option<String>,
}

/// What the request is about to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Submitted for execution; a fuel limit is required.
    Execute,
    /// Dry run; the fuel limit may be absent.
    Simulate,
}

type Check = Result<(), ValidationIssue>;

fn check_sender(sender: &Sender, field: &str) -> Check {
    if is_hex(&sender.address, Some(IDENTIFIER_LENGTH)) {
        return Ok(());
    }
    Err(ValidationIssue::new(format!("{field}.address"), format!("Invalid {field} address"))
        .with_value(&sender.address))
}

fn check_optional_hex(value: &Option<String>, field: &str, message: &str) -> Check {
    match value {
        Some(v) if !is_hex(v, None) => Err(ValidationIssue::new(field, message).with_value(v)),
        _ => Ok(()),
    }
}

fn check(mode: ValidationMode, ix: &InteractionRequest) -> Check {
    match &ix.sender {
        None => return Err(ValidationIssue::new("sender", "Sender is required")),
        Some(sender) => check_sender(sender, "sender")?,
    }

    if ix.fuel_price.is_none() {
        return Err(ValidationIssue::new("fuel_price", "Fuel price is required"));
    }

    if mode == ValidationMode::Execute && ix.fuel_limit.is_none() {
        return Err(ValidationIssue::new("fuel_limit", "Fuel limit is required"));
    }

    if let Some(sponsor) = &ix.sponsor {
        check_sender(sponsor, "sponsor")?;
    }

    if let Some(participants) = &ix.participants {
        for (index, participant) in participants.iter().enumerate() {
            if !is_hex(&participant.id, Some(IDENTIFIER_LENGTH)) {
                return Err(ValidationIssue::new(
                    format!("participants[{index}].id"),
                    "Invalid participant address",
                )
                .with_value(&participant.id));
            }
        }
    }

    if let Some(preferences) = &ix.preferences {
        check_optional_hex(
            &preferences.compute,
            "preferences.compute",
            "Compute preference must be a hex string",
        )?;
    }
    check_optional_hex(&ix.perception, "perception", "Perception must be a hex string")?;

    if ix.operations.is_empty() {
        return Err(ValidationIssue::new("operations", "At least one operation is required"));
    }

    let registry = OperationRegistry::global();
    for (index, operation) in ix.operations.iter().enumerate() {
        let issue = match registry.descriptor(operation.kind()) {
            Ok(descriptor) => descriptor.validate(operation),
            Err(e) => Some(ValidationIssue::new("type", e.to_string()).with_value(operation.kind())),
        };
        if let Some(issue) = issue {
            return Err(issue.prefixed(&format!("operations[{index}]")));
        }
    }

    Ok(())
}

/// First violation in `ix` for the given mode, if any.
pub fn validate_request(mode: ValidationMode, ix: &InteractionRequest) -> Option<ValidationIssue> {
    check(mode, ix).err()
}
