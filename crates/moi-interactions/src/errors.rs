//! # Error Types
//!
//! Validation findings are values ([`ValidationIssue`]); the errors below
//! are raised only when no valid encoding or submission can be produced.

use crate::domain::validation::ValidationIssue;
use moi_polo::PoloError;
use moi_types::{OpKind, TypeError};
use thiserror::Error;

/// Errors raised by the operation codec, the assembler and the service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IxError {
    /// No descriptor is registered for the operation kind.
    #[error("operation kind {0} is not registered")]
    UnregisteredOperationKind(OpKind),

    /// An operation payload failed validation.
    #[error("invalid operation: {0}")]
    InvalidOperation(ValidationIssue),

    /// An interaction request failed validation.
    #[error("invalid interaction request: {0}")]
    InvalidRequest(ValidationIssue),

    /// An operation payload could not be read into its kind's shape.
    #[error("malformed {kind} payload: {reason}")]
    MalformedPayload { kind: OpKind, reason: String },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Identifier or hex conversion failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// POLO encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] PoloError),

    /// The transport collaborator reported a failure.
    #[error("transport error: {0}")]
    Transport(String),
}
