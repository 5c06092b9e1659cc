//! # Operation Codec
//!
//! Encodes one operation payload with its registry descriptor.
//! Encoding fails closed: the payload is validated before it is transformed.

use crate::domain::operations::{Operation, RawOperation};
use crate::domain::registry::OperationRegistry;
use crate::domain::validation::ValidationIssue;
use crate::errors::IxError;
use moi_polo::{Depolorizer, PoloValue, Polorizer};
use moi_types::OpKind;
use tracing::trace;

/// Wire form of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOperation {
    pub kind: OpKind,
    pub payload: Vec<u8>,
}

impl EncodedOperation {
    /// Payload as lowercase hex without prefix.
    #[must_use]
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }

    /// Value of the `{type, payload}` struct carried in an interaction.
    #[must_use]
    pub fn to_value(&self) -> PoloValue {
        PoloValue::structure()
            .with("type", u64::from(self.kind.code()))
            .with("payload", self.payload.clone())
    }
}

/// Operation encoder backed by the global [`OperationRegistry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationCodec;

impl OperationCodec {
    /// First violation in `operation`, if any.
    pub fn validate(operation: &Operation) -> Result<Option<ValidationIssue>, IxError> {
        OperationRegistry::global().validate(operation)
    }

    /// Validate, transform and serialise `operation`.
    pub fn encode(operation: &Operation) -> Result<EncodedOperation, IxError> {
        let kind = operation.kind();
        let descriptor = OperationRegistry::global().descriptor(kind)?;

        if let Some(issue) = descriptor.validate(operation) {
            return Err(IxError::InvalidOperation(issue));
        }

        let value = descriptor.transform(operation)?;
        let mut polorizer = Polorizer::new();
        polorizer.polorize(&value, descriptor.schema())?;
        let payload = polorizer.bytes();

        trace!(%kind, payload_len = payload.len(), "encoded operation");
        Ok(EncodedOperation { kind, payload })
    }

    /// Encode an untyped operation, rejecting unregistered kinds.
    pub fn encode_raw(raw: RawOperation) -> Result<EncodedOperation, IxError> {
        Self::encode(&Operation::try_from(raw)?)
    }

    /// Decode an encoded payload back into its wire-level value.
    pub fn decode(encoded: &EncodedOperation) -> Result<PoloValue, IxError> {
        let descriptor = OperationRegistry::global().descriptor(encoded.kind)?;
        Ok(Depolorizer::new(&encoded.payload)?.depolorize(descriptor.schema())?)
    }
}
