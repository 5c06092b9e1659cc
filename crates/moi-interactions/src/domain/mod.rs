//! # Domain Layer
//!
//! Pure, synchronous encoding logic. No I/O happens here.

pub mod assembler;
pub mod codec;
pub mod interaction;
pub mod operations;
pub mod registry;
pub mod validation;

pub use assembler::{InteractionAssembler, Participant, RawInteraction, RawPreference, RawSender};
pub use codec::{EncodedOperation, OperationCodec};
pub use interaction::{
    validate_request, InteractionRequest, IxConsensusPreference, IxParticipant, IxPreference,
    Sender, ValidationMode,
};
pub use operations::*;
pub use registry::{OperationDescriptor, OperationRegistry};
pub use validation::ValidationIssue;
