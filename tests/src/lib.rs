//! # MOI SDK Core Test Suite
//!
//! Cross-crate tests for the SDK core.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── operation_vectors.rs   # Payload encodings checked against node fixtures
//!     ├── interaction_flow.rs    # Request validation, assembly and submission
//!     └── state_paths.rs         # Manifest paths, storage keys and state reads
//!
//! tests/benches/
//! └── codec_benchmarks.rs        # Operation, interaction and storage-key throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p moi-tests
//! cargo test -p moi-tests integration::state_paths
//! cargo bench -p moi-tests
//! ```

pub mod integration;
