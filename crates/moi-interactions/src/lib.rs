//! # MOI Interactions
//!
//! Operation registry and codec, interaction assembly, and a submission
//! service over a caller-supplied transport.
//!
//! ## Flow
//!
//! ```text
//! InteractionRequest
//!   └─ validate_request(mode)          first issue, path-qualified
//!   └─ InteractionAssembler::encode
//!        ├─ gather_participants        sender, sponsor, implied, explicit
//!        └─ OperationCodec::encode     per operation, validates first
//!   └─ InteractionTransport            execute / simulate (outbound port)
//! ```
//!
//! ## Module Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | `domain` | payloads, registry, codec, request validation, assembler |
//! | `ports` | [`InteractionTransport`] |
//! | `service` | [`InteractionService`] |
//! | `config` | [`IxDefaults`] |
//!
//! The registry is immutable after first use and safe to share across
//! threads.

pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use config::IxDefaults;
pub use domain::*;
pub use errors::IxError;
pub use ports::{ExecuteResponse, InteractionTransport, SimulateResponse};
pub use service::{InteractionService, ServiceStats};
