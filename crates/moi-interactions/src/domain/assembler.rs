//! # Interaction Assembler
//!
//! Derives the participant set of an interaction and serialises the whole
//! request. The top-level wire order is fixed:
//!
//! ```text
//! sender, sponsor, fuel_price, fuel_limit, operations, participants,
//! preferences, perception
//! ```

use crate::domain::codec::{EncodedOperation, OperationCodec};
use crate::domain::interaction::{InteractionRequest, IxParticipant, IxPreference, Sender};
use crate::domain::operations::Operation;
use crate::domain::validation::ValidationIssue;
use crate::errors::IxError;
use lazy_static::lazy_static;
use moi_polo::{PoloSchema, PoloValue, Polorizer};
use moi_types::hex::hex_to_bytes;
use moi_types::{AssetId, LockType, LogicId, ParticipantId};
use std::collections::HashSet;
use tracing::debug;

lazy_static! {
    static ref INTERACTION_SCHEMA: PoloSchema = interaction_schema();
}

fn sender_schema() -> PoloSchema {
    PoloSchema::structure([
        ("address", PoloSchema::Bytes),
        ("sequence_id", PoloSchema::Integer),
        ("key_id", PoloSchema::Integer),
    ])
}

fn interaction_schema() -> PoloSchema {
    PoloSchema::structure([
        ("sender", sender_schema()),
        ("sponsor", sender_schema()),
        ("fuel_price", PoloSchema::Integer),
        ("fuel_limit", PoloSchema::Integer),
        (
            "operations",
            PoloSchema::array(PoloSchema::structure([
                ("type", PoloSchema::Integer),
                ("payload", PoloSchema::Bytes),
            ])),
        ),
        (
            "participants",
            PoloSchema::array(PoloSchema::structure([
                ("id", PoloSchema::Bytes),
                ("lock_type", PoloSchema::Integer),
                ("notary", PoloSchema::Bool),
            ])),
        ),
        (
            "preferences",
            PoloSchema::structure([
                ("compute", PoloSchema::Bytes),
                (
                    "consensus",
                    PoloSchema::structure([
                        ("mtq", PoloSchema::Integer),
                        ("trust_nodes", PoloSchema::array(PoloSchema::String)),
                    ]),
                ),
            ]),
        ),
        ("perception", PoloSchema::Bytes),
    ])
}

// =============================================================================
// WIRE FORM
// =============================================================================

/// A participant with its id resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Participant {
    pub id: ParticipantId,
    pub lock_type: LockType,
    pub notary: bool,
}

impl Participant {
    /// Mutate-locked, non-notary participant.
    #[must_use]
    pub const fn mutate(id: ParticipantId) -> Self {
        Self {
            id,
            lock_type: LockType::MutateLock,
            notary: false,
        }
    }

    fn to_value(self) -> PoloValue {
        PoloValue::structure()
            .with("id", self.id.as_bytes().to_vec())
            .with("lock_type", u64::from(u8::from(self.lock_type)))
            .with("notary", self.notary)
    }
}

impl From<Participant> for IxParticipant {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.id.to_hex(),
            lock_type: participant.lock_type,
            notary: participant.notary,
        }
    }
}

/// Sender or sponsor with its address resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSender {
    pub address: ParticipantId,
    pub sequence_id: u64,
    pub key_id: u64,
}

impl RawSender {
    fn from_sender(sender: &Sender) -> Result<Self, IxError> {
        Ok(Self {
            address: ParticipantId::from_hex(&sender.address)?,
            sequence_id: sender.sequence_id,
            key_id: sender.key_id,
        })
    }

    fn zero() -> Self {
        Self {
            address: ParticipantId::ZERO,
            sequence_id: 0,
            key_id: 0,
        }
    }

    fn to_value(self) -> PoloValue {
        PoloValue::structure()
            .with("address", self.address.as_bytes().to_vec())
            .with("sequence_id", self.sequence_id)
            .with("key_id", self.key_id)
    }
}

/// Preferences with hex fields decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPreference {
    pub compute: Option<Vec<u8>>,
    pub consensus: Option<(u64, Vec<String>)>,
}

impl RawPreference {
    fn from_preference(preference: &IxPreference) -> Result<Self, IxError> {
        Ok(Self {
            compute: preference.compute.as_deref().map(hex_to_bytes).transpose()?,
            consensus: preference
                .consensus
                .as_ref()
                .map(|c| (c.mtq, c.trust_nodes.clone())),
        })
    }

    fn to_value(&self) -> PoloValue {
        let consensus = self.consensus.as_ref().map(|(mtq, nodes)| {
            PoloValue::structure().with("mtq", *mtq).with(
                "trust_nodes",
                nodes.iter().map(|n| PoloValue::from(n.as_str())).collect::<Vec<_>>(),
            )
        });
        PoloValue::structure()
            .with_opt("compute", self.compute.clone())
            .with_opt("consensus", consensus)
    }
}

/// Fully raw interaction: identifiers as bytes, operations encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInteraction {
    pub sender: RawSender,
    pub sponsor: RawSender,
    pub fuel_price: Option<u64>,
    pub fuel_limit: Option<u64>,
    pub operations: Vec<EncodedOperation>,
    pub participants: Vec<Participant>,
    pub preferences: Option<RawPreference>,
    pub perception: Option<Vec<u8>>,
}

impl RawInteraction {
    /// Value encoded with the interaction schema.
    #[must_use]
    pub fn to_value(&self) -> PoloValue {
        PoloValue::structure()
            .with("sender", self.sender.to_value())
            .with("sponsor", self.sponsor.to_value())
            .with_opt("fuel_price", self.fuel_price)
            .with_opt("fuel_limit", self.fuel_limit)
            .with(
                "operations",
                self.operations.iter().map(EncodedOperation::to_value).collect::<Vec<_>>(),
            )
            .with(
                "participants",
                self.participants.iter().map(|p| p.to_value()).collect::<Vec<_>>(),
            )
            .with_opt("preferences", self.preferences.as_ref().map(RawPreference::to_value))
            .with_opt("perception", self.perception.clone())
    }
}

// =============================================================================
// ASSEMBLER
// =============================================================================

/// Insertion-ordered participant set.
#[derive(Default)]
struct ParticipantSet {
    entries: Vec<Participant>,
    seen: HashSet<ParticipantId>,
}

impl ParticipantSet {
    fn insert(&mut self, participant: Participant) {
        if self.seen.insert(participant.id) {
            self.entries.push(participant);
        }
    }

    fn insert_hex(&mut self, hex: &Option<String>) -> Result<(), IxError> {
        if let Some(hex) = hex {
            self.insert(Participant::mutate(ParticipantId::from_hex(hex)?));
        }
        Ok(())
    }
}

fn implied_participants(operation: &Operation, set: &mut ParticipantSet) -> Result<(), IxError> {
    match operation {
        Operation::ParticipantCreate(p) => set.insert_hex(&p.address)?,
        Operation::AssetMint(p) | Operation::AssetBurn(p) => {
            if let Some(asset) = &p.asset_id {
                set.insert(Participant::mutate(AssetId::from_hex(asset)?.address()));
            }
        }
        Operation::AssetTransfer(p)
        | Operation::AssetApprove(p)
        | Operation::AssetRevoke(p)
        | Operation::AssetLockup(p)
        | Operation::AssetRelease(p) => {
            set.insert_hex(&p.beneficiary)?;
            set.insert_hex(&p.benefactor)?;
        }
        Operation::LogicInvoke(p) | Operation::LogicEnlist(p) => {
            if let Some(logic) = &p.logic_id {
                set.insert(Participant::mutate(LogicId::from_hex(logic)?.address()));
            }
        }
        Operation::AccountConfigure(_) | Operation::AssetCreate(_) | Operation::LogicDeploy(_) => {}
    }
    Ok(())
}

/// Builds and serialises interactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionAssembler;

impl InteractionAssembler {
    /// Participants of `ix`, in order: sender, sponsor, participants implied
    /// by each operation, then explicit participants not already present.
    ///
    /// Derived entries are mutate-locked and never overridden by explicit
    /// ones. Running this on a request whose explicit participants are its
    /// own output yields the same list.
    pub fn gather_participants(ix: &InteractionRequest) -> Result<Vec<Participant>, IxError> {
        let mut set = ParticipantSet::default();

        if let Some(sender) = &ix.sender {
            set.insert(Participant::mutate(ParticipantId::from_hex(&sender.address)?));
        }
        if let Some(sponsor) = &ix.sponsor {
            set.insert(Participant::mutate(ParticipantId::from_hex(&sponsor.address)?));
        }

        for operation in &ix.operations {
            implied_participants(operation, &mut set)?;
        }

        for explicit in ix.participants.iter().flatten() {
            set.insert(Participant {
                id: ParticipantId::from_hex(&explicit.id)?,
                lock_type: explicit.lock_type,
                notary: explicit.notary,
            });
        }

        debug!(count = set.entries.len(), "gathered participants");
        Ok(set.entries)
    }

    /// Raw structure of `ix`. Every operation is validated and encoded.
    pub fn to_wire_form(ix: &InteractionRequest) -> Result<RawInteraction, IxError> {
        let sender = ix
            .sender
            .as_ref()
            .ok_or_else(|| IxError::InvalidRequest(ValidationIssue::new("sender", "Sender is required")))?;

        let operations = ix
            .operations
            .iter()
            .enumerate()
            .map(|(index, operation)| {
                OperationCodec::encode(operation).map_err(|e| match e {
                    IxError::InvalidOperation(issue) => {
                        IxError::InvalidOperation(issue.prefixed(&format!("operations[{index}]")))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RawInteraction {
            sender: RawSender::from_sender(sender)?,
            sponsor: match &ix.sponsor {
                Some(sponsor) => RawSender::from_sender(sponsor)?,
                None => RawSender::zero(),
            },
            fuel_price: ix.fuel_price,
            fuel_limit: ix.fuel_limit,
            operations,
            participants: Self::gather_participants(ix)?,
            preferences: ix
                .preferences
                .as_ref()
                .map(RawPreference::from_preference)
                .transpose()?,
            perception: ix.perception.as_deref().map(hex_to_bytes).transpose()?,
        })
    }

    /// Serialise `ix` with the interaction schema.
    pub fn encode(ix: &InteractionRequest) -> Result<Vec<u8>, IxError> {
        let raw = Self::to_wire_form(ix)?;
        let mut polorizer = Polorizer::new();
        polorizer.polorize(&raw.to_value(), &INTERACTION_SCHEMA)?;
        let bytes = polorizer.bytes();

        debug!(
            operations = raw.operations.len(),
            participants = raw.participants.len(),
            size = bytes.len(),
            "encoded interaction"
        );
        Ok(bytes)
    }

    /// Schema of the serialised interaction.
    pub fn schema() -> &'static PoloSchema {
        &*INTERACTION_SCHEMA
    }
}
